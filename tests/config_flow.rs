//! End-to-end flows across the public surface: config stores composed with
//! the prop-list algebra, flushing into a shared in-memory sheet.

use std::rc::Rc;

use css_config::{
    backup_props, create_css_config, drain_pending, include_prefixed, overwrite_parent_props,
    restore_props, CssConfigOptions, CssValue, MemorySheet, PropList, StyleBinding,
};

fn options(sheet: &Rc<MemorySheet>, prefix: &str, rule: Option<&str>) -> CssConfigOptions {
    CssConfigOptions {
        prefix: Some(prefix.to_string()),
        rule: rule.map(str::to_string),
        binding: Some(sheet.clone() as Rc<dyn StyleBinding>),
    }
}

#[test]
fn config_lifecycle_renders_css() {
    let sheet = Rc::new(MemorySheet::new());
    let button = create_css_config(
        [("bg", "red"), ("fg", "white"), ("gap", "4px")],
        options(&sheet, "btn", Some(".btn")),
    );

    // Nothing rendered until the first boundary.
    assert_eq!(sheet.declarations(".btn"), None);
    drain_pending();
    assert_eq!(sheet.declaration(".btn", "--btn-bg"), Some("red".to_string()));

    // A burst of writes lands as one batch at the next boundary.
    button.vals.set("bg", "blue");
    button.vals.unset("gap");
    button.vals.set("pad", CssValue::Space(vec!["2px".into(), "4px".into()]));
    let before = sheet.apply_count();
    drain_pending();
    assert_eq!(sheet.apply_count(), before + 1);

    assert_eq!(
        sheet.css_text(),
        ".btn {\n--btn-bg: blue;\n--btn-fg: white;\n--btn-pad: 2px 4px;\n}\n"
    );

    // The vals export mirrors the rule: deleted keys are omitted.
    let live = button.vals.prop_list();
    let keys: Vec<&str> = live.keys().collect();
    assert_eq!(keys, vec!["bg", "fg", "pad"]);
}

#[test]
fn child_config_overwrites_parents() {
    let sheet = Rc::new(MemorySheet::new());
    let basic = create_css_config([("color", "black")], options(&sheet, "basic", None));
    let control = create_css_config([("color", "gray")], options(&sheet, "control", None));
    let button = create_css_config([("color", "blue")], options(&sheet, "btn", Some(".btn")));

    // Redirect both parents' declarations at the button's references,
    // most specific parent first.
    let overwrites = overwrite_parent_props(
        &button.refs.prop_list(),
        &[&control.decls.prop_list(), &basic.decls.prop_list()],
    );

    let entries: Vec<(&str, &CssValue)> = overwrites.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "--control-color");
    assert_eq!(entries[1].0, "--basic-color");
    assert_eq!(entries[0].1, &CssValue::from("var(--btn-color)"));
}

#[test]
fn variant_props_split_off_by_prefix() {
    let sheet = Rc::new(MemorySheet::new());
    let card = create_css_config(
        [
            ("bg", "white"),
            ("icon-size", "1em"),
            ("icon-color", "currentColor"),
        ],
        options(&sheet, "card", None),
    );

    let icon = include_prefixed(&card.refs.prop_list(), "icon-", true);
    let keys: Vec<&str> = icon.keys().collect();
    assert_eq!(keys, vec!["size", "color"]);
    assert_eq!(icon.get("size"), Some(&CssValue::from("var(--card-icon-size)")));
}

#[test]
fn backup_then_restore_reconstitutes_references() {
    let decls: PropList = [("--com-bg", "--com-bg"), ("--com-fg", "--com-fg")]
        .into_iter()
        .collect();

    let saved = backup_props(&decls, "Bak");
    let restored = restore_props(&decls, "Bak");

    // Merging saved + restored points every live declaration at its backup,
    // and every backup back at the live declaration - no key lost.
    for key in decls.keys() {
        let backup_key = format!("{key}Bak");
        assert_eq!(saved.get(&backup_key), Some(&CssValue::from(format!("var({key})"))));
        assert_eq!(
            restored.get(key),
            Some(&CssValue::from(format!("var({backup_key})")))
        );
    }
}
