#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        equality is OK
        r#"
        print true == true;
        print true == false;
        print false == true;
        print false == false;

        print true == 1;
        print false == 0;
        print true == "true";
        print false == "false";
        print false == nil;
        "#,
        "true",
        "false",
        "false",
        "true",
        "false",
        "false",
        "false",
        "false",
        "false"
    }

    tests! {
        not is OK
        r#"
        print !true;
        print !false;
        print !!true;
        "#,
        "false",
        "true",
        "true"
    }

    tests! {
        only_false_and_nil_are_falsey is OK
        r#"
        print !nil;
        print !0;
        print !"";
        "#,
        "true",
        "false",
        "false"
    }
}
