use super::{strip_module_paths, type_name};
use crate::{display_mode, multiset, set_display_mode, DisplayMode, Multiset};
use pretty_assertions::assert_eq;
use std::fmt::Write;

#[test]
fn braces_are_sorted() {
    let bag = multiset![3, 1, 3, 2, 3, 2];
    assert_eq!(bag.show(DisplayMode::Braces).to_string(), "{1,2,2,3,3,3}");
}

#[test]
fn braces_do_not_quote_strings() {
    let bag = multiset!["b".to_string(), "a".to_string()];
    assert_eq!(bag.show(DisplayMode::Braces).to_string(), "{a,b}");
}

#[test]
fn short_form_counts_repetitions() {
    let bag = multiset![1i64, 2, 2, 3, 3, 3];
    assert_eq!(
        bag.show(DisplayMode::Short).to_string(),
        "Multiset<i64> with 6 elements"
    );
    assert_eq!(
        Multiset::<String>::new().show(DisplayMode::Short).to_string(),
        "Multiset<String> with 0 elements"
    );
}

#[test]
fn constructor_form_quotes_strings() {
    let bag = multiset!["y".to_string(), "x".to_string(), "y".to_string()];
    assert_eq!(
        bag.show(DisplayMode::Constructor).to_string(),
        r#"Multiset(String["x","y","y"])"#
    );
}

#[test]
fn constructor_form_of_numbers() {
    let bag = multiset![2u8, 1];
    assert_eq!(
        bag.show(DisplayMode::Constructor).to_string(),
        "Multiset(u8[1,2])"
    );
    assert_eq!(
        Multiset::<u8>::new()
            .show(DisplayMode::Constructor)
            .to_string(),
        "Multiset(u8[])"
    );
}

#[test]
fn unordered_rendering_keeps_every_element() {
    #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
    struct Point(i32, i32);

    impl std::fmt::Display for Point {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "({} {})", self.0, self.1)
        }
    }

    let bag = multiset![Point(0, 1), Point(0, 1)];
    assert_eq!(
        bag.show_unordered(DisplayMode::Braces).to_string(),
        "{(0 1),(0 1)}"
    );
    assert_eq!(
        bag.show_unordered(DisplayMode::Short).to_string(),
        "Multiset<Point> with 2 elements"
    );
}

#[test]
fn renders_into_any_sink() {
    let mut out = String::new();
    write!(out, "bag = {}", multiset![1].show(DisplayMode::Braces)).unwrap();
    assert_eq!(out, "bag = {1}");

    let mut bytes = Vec::new();
    std::io::Write::write_fmt(
        &mut bytes,
        format_args!("{}", multiset![1].show(DisplayMode::Short)),
    )
    .unwrap();
    assert_eq!(bytes, b"Multiset<i32> with 1 elements".to_vec());
}

#[test]
fn stale_entries_are_not_rendered() {
    let mut bag = multiset![1, 2];
    bag.insert_many(2, -1);
    assert_eq!(bag.show(DisplayMode::Braces).to_string(), "{1}");
}

#[test]
fn process_wide_mode() {
    // The only test that touches the process-wide mode.
    assert_eq!(display_mode(), DisplayMode::Braces);
    let bag = multiset![2, 1];
    assert_eq!(bag.to_string(), "{1,2}");

    set_display_mode(DisplayMode::Short);
    assert_eq!(display_mode(), DisplayMode::Short);
    assert_eq!(bag.to_string(), "Multiset<i32> with 2 elements");

    set_display_mode(DisplayMode::Constructor);
    assert_eq!(bag.to_string(), "Multiset(i32[1,2])");

    set_display_mode(DisplayMode::Braces);
    assert_eq!(bag.to_string(), "{1,2}");
}

#[test]
fn mode_names_round_trip() {
    for mode in DisplayMode::ALL {
        assert_eq!(mode.to_string().parse::<DisplayMode>(), Ok(*mode));
    }
    assert_eq!("Short".parse::<DisplayMode>(), Ok(DisplayMode::Short));
}

#[test]
fn unknown_mode_name() {
    let err = "curly".parse::<DisplayMode>().unwrap_err();
    assert_eq!(err.input, "curly");
    assert_eq!(
        err.to_string(),
        r#"unknown display mode "curly" (expected braces, short or constructor)"#
    );
}

#[test]
fn type_names_drop_module_paths() {
    assert_eq!(type_name::<String>(), "String");
    assert_eq!(type_name::<Option<String>>(), "Option<String>");
    assert_eq!(type_name::<&str>(), "&str");
    assert_eq!(
        strip_module_paths("(i32, alloc::vec::Vec<core::option::Option<u8>>)"),
        "(i32, Vec<Option<u8>>)"
    );
}
