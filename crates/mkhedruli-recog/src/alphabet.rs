//! The Mkhedruli alphabet used by the reference template set.

/// The 33 modern Georgian (Mkhedruli) letters in template order.
pub const GEORGIAN_ALPHABET: &str = "აბგდევზთიკლმნოპჟრსტუფქღყშჩცძწჭხჯჰ";

/// Split an alphabet string into symbols, skipping whitespace.
pub fn alphabet_symbols(alphabet: &str) -> Vec<char> {
    alphabet.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn georgian_alphabet_has_33_unique_letters() {
        let mut symbols = alphabet_symbols(GEORGIAN_ALPHABET);
        assert_eq!(symbols.len(), 33);
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 33);
    }

    #[test]
    fn whitespace_is_not_a_symbol() {
        assert_eq!(alphabet_symbols("a b\tc\n"), vec!['a', 'b', 'c']);
    }
}
