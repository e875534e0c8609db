#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals is OK
        r#"
        print "()";
        print "a string";
        print "A~¶Þॐஃ";
        "#,
        "()",
        "a string",
        "A~¶Þॐஃ"
    }

    tests! {
        multiline_strings_are_allowed is OK
        r#"
        var s = "1
2
3";
        print s;
        "#,
        "1\n2\n3"
    }

    tests! {
        unterminated_string_is_a_scan_error is ERR
        r#"
        var s = "unterminated;
        "#,
        "[line 2] Error: Unterminated string."
    }

    tests! {
        concatenation is OK
        r#"
        print "foo" + "bar";
        "#,
        "foobar"
    }
}
