use super::*;

#[test]
fn escape_cases() {
    let cases: &[(&str, bool, &str)] = &[
        ("plain text", false, "plain text"),
        ("a & b", false, "a &amp; b"),
        ("<tag>", false, "&lt;tag&gt;"),
        ("say \"hi\"", false, "say \"hi\""),
        ("say \"hi\"", true, "say &quot;hi&quot;"),
        ("line\r\nnext", false, "line&#xD;\nnext"),
    ];
    for (input, attribute, expected) in cases {
        assert_eq!(escape(input, *attribute), *expected, "input: {:?}", input);
    }
}

#[test]
fn escape_borrows_clean_text() {
    assert!(matches!(escape("/home/movies/a.mkv", false), Cow::Borrowed(_)));
}

#[test]
fn nested_elements_are_indented() {
    let mut w = XmlWriter::new();
    w.open("Root", &[("id", "x&y")]);
    w.open("Child", &[]);
    w.leaf("Name", "a<b");
    w.close("Child");
    w.empty_element("Empty", &[]);
    w.close("Root");

    let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                    <Root id=\"x&amp;y\">\n\
                    \x20\x20<Child>\n\
                    \x20\x20\x20\x20<Name>a&lt;b</Name>\n\
                    \x20\x20</Child>\n\
                    \x20\x20<Empty />\n\
                    </Root>\n";
    assert_eq!(w.finish(), expected);
}
