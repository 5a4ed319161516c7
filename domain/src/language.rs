use crate::LanguageDescriptor;

const fn lang(code: &'static str, name: &'static str, flag: &'static str) -> LanguageDescriptor {
    LanguageDescriptor { code, name, flag }
}

/// Target languages offered to clients, in display order.
pub static LANGUAGES: [LanguageDescriptor; 33] = [
    lang("en", "English", "🇺🇸"),
    lang("es", "Spanish", "🇪🇸"),
    lang("fr", "French", "🇫🇷"),
    lang("de", "German", "🇩🇪"),
    lang("it", "Italian", "🇮🇹"),
    lang("pt", "Portuguese", "🇵🇹"),
    lang("ru", "Russian", "🇷🇺"),
    lang("ja", "Japanese", "🇯🇵"),
    lang("ko", "Korean", "🇰🇷"),
    lang("zh-cn", "Chinese", "🇨🇳"),
    // Indic
    lang("hi", "Hindi", "🇮🇳"),
    lang("ta", "Tamil", "🇮🇳"),
    lang("te", "Telugu", "🇮🇳"),
    lang("ml", "Malayalam", "🇮🇳"),
    lang("bn", "Bengali", "🇮🇳"),
    lang("mr", "Marathi", "🇮🇳"),
    lang("gu", "Gujarati", "🇮🇳"),
    lang("kn", "Kannada", "🇮🇳"),
    lang("pa", "Punjabi", "🇮🇳"),
    lang("or", "Odia", "🇮🇳"),
    lang("ar", "Arabic", "🇸🇦"),
    lang("tr", "Turkish", "🇹🇷"),
    lang("nl", "Dutch", "🇳🇱"),
    lang("pl", "Polish", "🇵🇱"),
    lang("sv", "Swedish", "🇸🇪"),
    lang("da", "Danish", "🇩🇰"),
    lang("fi", "Finnish", "🇫🇮"),
    lang("no", "Norwegian", "🇳🇴"),
    lang("el", "Greek", "🇬🇷"),
    lang("he", "Hebrew", "🇮🇱"),
    lang("id", "Indonesian", "🇮🇩"),
    lang("th", "Thai", "🇹🇭"),
    lang("vi", "Vietnamese", "🇻🇳"),
];

pub fn find_language(code: &str) -> Option<&'static LanguageDescriptor> {
    LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_listed_first() {
        assert_eq!(LANGUAGES[0].code, "en");
        assert_eq!(LANGUAGES[0].name, "English");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_language("ZH-CN").map(|l| l.name), Some("Chinese"));
        assert!(find_language("xx").is_none());
    }
}
