/*!
 * Tests for ISO language code utilities
 */

use parlance::language_utils::{
    LanguageCodeType, get_language_name, language_codes_match, normalize_for_service,
    normalize_to_part2t, validate_language_code, validate_source_language,
};

#[test]
fn test_validateLanguageCode_withEachCodeType_shouldClassify() {
    assert_eq!(validate_language_code("es").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("spa").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_validateSourceLanguage_shouldAcceptAutoOnlyForSource() {
    assert!(validate_source_language("auto").is_ok());
    assert!(validate_source_language("AUTO").is_ok());
    assert!(validate_language_code("auto").is_err());
}

#[test]
fn test_normalizeToPart2t_shouldMapAllForms() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t(" DEU ").unwrap(), "deu");
}

#[test]
fn test_normalizeForService_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_for_service("ger").unwrap(), "de");
    assert_eq!(normalize_for_service("es").unwrap(), "es");
    assert_eq!(normalize_for_service("auto").unwrap(), "auto");
}

#[test]
fn test_languageCodesMatch_acrossCodeTypes_shouldMatch() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("de", "deu"));
    assert!(!language_codes_match("fr", "es"));
    assert!(!language_codes_match("fr", "zz"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert!(get_language_name("zz").is_err());
}
