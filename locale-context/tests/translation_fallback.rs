use locale_context::{Locale, LocaleContext, ResourceBundle};
use proptest::prelude::*;
use std::sync::Arc;

const EN: &str = r#"
locale: en
strings:
  shared: "english shared"
  only.english: "english only"
voice_commands:
  start: "start consultation"
"#;

const HI: &str = r#"
locale: hi
strings:
  shared: "hindi shared"
  only.hindi: "hindi only"
"#;

fn context() -> LocaleContext {
    let bundle = ResourceBundle::from_documents([("en", EN), ("hi", HI)]).unwrap();
    LocaleContext::new(Arc::new(bundle), Locale::English)
}

#[test]
fn active_table_wins_over_default() {
    let ctx = context();
    ctx.set_locale(Locale::Hindi);
    assert_eq!(ctx.t("shared"), "hindi shared");
    assert_eq!(ctx.t("only.english"), "english only");
    assert_eq!(ctx.t_in(Locale::English, "only.hindi"), "[only.hindi]");
}

#[test]
fn locale_without_a_table_uses_default() {
    let ctx = context();
    ctx.set_locale(Locale::Bengali);
    assert_eq!(ctx.t("shared"), "english shared");
    assert_eq!(ctx.voice_command("start"), "start consultation");
}

#[test]
fn every_embedded_locale_resolves_core_voice_strings() {
    let ctx = LocaleContext::embedded().unwrap();
    for locale in Locale::ALL {
        ctx.set_locale(locale);
        for key in ["voice.normal.reply", "voice.emergency.reply", "command.welcome"] {
            let text = ctx.t(key);
            assert!(!text.starts_with('['), "{} missing for {}", key, locale);
        }
    }
}

proptest! {
    #[test]
    fn unknown_keys_always_render_bracketed(key in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}") {
        prop_assume!(!["shared", "only.english", "only.hindi"].contains(&key.as_str()));
        let ctx = context();
        for locale in Locale::ALL {
            prop_assert_eq!(ctx.t_in(locale, &key), format!("[{}]", key));
        }
    }

    #[test]
    fn known_keys_never_render_bracketed(index in 0usize..Locale::ALL.len()) {
        let ctx = context();
        let locale = Locale::ALL[index];
        prop_assert!(!ctx.t_in(locale, "shared").starts_with('['));
        prop_assert!(!ctx.t_in(locale, "only.english").starts_with('['));
    }
}
