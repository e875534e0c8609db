#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        duplicate_local_is_a_resolve_error is ERR
        r#"
        {
            var a = "first";
            var a = "second";
        }
        "#,
        "[line 4] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_parameter_is_a_resolve_error is ERR
        r#"
        fun f(arg, arg) {
            print arg;
        }
        "#,
        "[line 2] Error at 'arg': Already a variable with this name in this scope."
    }

    tests! {
        globals_may_be_redeclared_and_redefined is OK
        r#"
        var a = "1";
        var a = "2";
        print a;
        a = "3";
        print a;
        "#,
        "2",
        "3"
    }

    tests! {
        shadowing_in_a_nested_block is OK
        r#"
        var a = "outer";
        {
            var a = "inner";
            print a;
        }
        print a;
        "#,
        "inner",
        "outer"
    }

    tests! {
        variable_is_looked_up_in_the_scope_it_was_declared_in is OK
        r#"
        var a = "outer";
        fun showA() {
            print a;
        }
        showA();
        var a2 = a;
        {
            var a = "inner";
        }
        showA();
        "#,
        "outer",
        "outer"
    }

    tests! {
        undefined_global_is_a_runtime_error is ERR
        r#"
        print notDefined;
        "#,
        "Error: Undefined variable 'notDefined'.",
        "[line 2]"
    }

    tests! {
        undefined_local_is_a_runtime_error is ERR
        r#"
        {
            print notDefined;
        }
        "#,
        "Error: Undefined variable 'notDefined'.",
        "[line 3]"
    }

    tests! {
        uninitialized_variable_is_nil is OK
        r#"
        var a;
        print a;
        "#,
        "nil"
    }

    tests! {
        false_is_not_a_valid_variable_name is ERR
        r#"
        var false = 1;
        "#,
        "[line 2] Error at 'false': Expect variable name."
    }

    tests! {
        this_is_not_a_valid_variable_name is ERR
        r#"
        var this = 1;
        "#,
        "[line 2] Error at 'this': Expect variable name."
    }

    tests! {
        global_initializer_may_reference_another_global is OK
        r#"
        var a = "value";
        var b = a;
        print b;
        "#,
        "value"
    }

    tests! {
        reading_a_local_in_its_own_initializer_is_a_resolve_error is ERR
        r#"
        var a = "outer";
        {
            var a = a;
        }
        "#,
        "[line 4] Error at 'a': Can't read local variable in its own initializer."
    }
}
