#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        integer_and_decimal_literals is OK
        r#"
        print 123;
        print 987654;
        print 0;
        print 123.456;
        print 0.001;
        "#,
        "123",
        "987654",
        "0",
        "123.456",
        "0.001"
    }

    tests! {
        negative_literals_are_unary_minus is OK
        r#"
        print -0;
        print -0.001;
        print -123;
        "#,
        "0",
        "-0.001",
        "-123"
    }

    tests! {
        a_bare_leading_dot_is_not_a_valid_expression is ERR
        r#"
        print .5;
        "#,
        "[line 2] Error at '.': Expect expression."
    }

    tests! {
        a_trailing_dot_expects_a_property_name is ERR
        r#"
        123.
        "#,
        "[line 3] Error at end: Expect property name after '.'."
    }

    tests! {
        nan_is_not_equal_to_itself is OK
        r#"
        var nan = 0 / 0;
        print nan == nan;
        print nan != nan;
        "#,
        "false",
        "true"
    }
}
