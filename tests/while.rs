#[macro_use]
mod common;

#[cfg(test)]
mod while_loop {
    tests! {
        counts_up_while_condition_holds is OK
        r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }
        "#,
        "0",
        "1",
        "2"
    }

    tests! {
        each_iteration_gets_a_fresh_binding_for_closures is OK
        r#"
        var f1;
        var f2;
        var f3;

        var i = 1;
        while (i < 4) {
            var j = i;
            fun f() {
                print j;
            }

            if (j == 1) f1 = f;
            else if (j == 2) f2 = f;
            else f3 = f;

            i = i + 1;
        }

        f1();
        f2();
        f3();
        "#,
        "1",
        "2",
        "3"
    }

    tests! {
        return_exits_the_loop_early is OK
        r#"
        fun f() {
            var i = 0;
            while (true) {
                if (i >= 3) return i;
                i = i + 1;
            }
        }
        print f();
        "#,
        "3"
    }

    tests! {
        class_declaration_is_not_a_valid_while_body is ERR
        r#"
        while (false) class Foo {}
        "#,
        "[line 2] Error at 'class': Expect expression."
    }

    tests! {
        fun_declaration_is_not_a_valid_while_body is ERR
        r#"
        while (false) fun foo() {}
        "#,
        "[line 2] Error at 'fun': Expect expression."
    }

    tests! {
        var_declaration_is_not_a_valid_while_body is ERR
        r#"
        while (false) var x = 1;
        "#,
        "[line 2] Error at 'var': Expect expression."
    }
}
