#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        and_returns_the_first_falsey_operand_or_the_last is OK
        r#"
        print false and 1;
        print true and 1;
        print 1 and 2 and false;
        print 1 and 2 and 3;
        "#,
        "false",
        "1",
        "false",
        "3"
    }

    tests! {
        and_short_circuits_on_falsey is OK
        r#"
        fun shouldNotRun() {
            print "should not run";
            return true;
        }
        print false and shouldNotRun();
        "#,
        "false"
    }

    tests! {
        or_returns_the_first_truthy_operand_or_the_last is OK
        r#"
        print 1 or 2;
        print false or 1;
        print false or false or true;
        print false or false or false;
        "#,
        "1",
        "1",
        "true",
        "false"
    }

    tests! {
        or_short_circuits_on_truthy is OK
        r#"
        fun shouldNotRun() {
            print "should not run";
            return false;
        }
        print true or shouldNotRun();
        "#,
        "true"
    }

    tests! {
        operands_are_not_coerced_to_bool is OK
        r#"
        print nil and "unreached";
        print "s" and "t";
        print 0 or "unreached";
        "#,
        "nil",
        "t",
        "0"
    }
}
