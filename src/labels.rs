//! Vertex label generation: A … Z, AA … AZ, BA … ZZ, AAA …

/// Label for vertex `index` in the spreadsheet-column sequence (bijective base 26).
pub fn alpha_name(index: usize) -> String {
    let mut n = index + 1;
    let mut rev = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        rev.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    rev.into_iter().rev().collect()
}

/// Generated labels for indices `0..count`.
pub fn alpha_names(count: usize) -> Vec<String> {
    (0..count).map(alpha_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters() {
        assert_eq!(alpha_name(0), "A");
        assert_eq!(alpha_name(6), "G");
        assert_eq!(alpha_name(25), "Z");
    }

    #[test]
    fn multi_letter_after_z() {
        assert_eq!(alpha_name(26), "AA");
        assert_eq!(alpha_name(27), "AB");
        assert_eq!(alpha_name(51), "AZ");
        assert_eq!(alpha_name(52), "BA");
        assert_eq!(alpha_name(701), "ZZ");
        assert_eq!(alpha_name(702), "AAA");
    }

    #[test]
    fn generated_names_are_unique() {
        let names = alpha_names(1000);
        let set: std::collections::BTreeSet<_> = names.iter().collect();
        assert_eq!(set.len(), names.len());
    }
}
