#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        body_must_be_a_block is ERR
        r#"
        fun f() 123;
        "#,
        "[line 2] Error at '123': Expect '{' before function body."
    }

    tests! {
        empty_body_returns_nil is OK
        r#"
        fun f() {}
        print f();
        "#,
        "nil"
    }

    tests! {
        too_many_arguments is ERR
        r#"
        fun f(a, b) {
            return a + b;
        }
        print f(1, 2, 3, 4);
        "#,
        "Error: Expected 2 arguments but got 4.",
        "[line 5]"
    }

    tests! {
        missing_arguments is ERR
        r#"
        fun f(a, b) {
            return a + b;
        }
        f(1);
        "#,
        "Error: Expected 2 arguments but got 1.",
        "[line 5]"
    }

    tests! {
        missing_comma_between_parameters is ERR
        r#"
        fun f(a b) {}
        "#,
        "[line 2] Error at 'b': Expect ')' after parameters."
    }

    tests! {
        mutual_recursion is OK
        r#"
        fun isEven(n) {
            if (n == 0) return true;
            return isOdd(n - 1);
        }
        fun isOdd(n) {
            if (n == 0) return false;
            return isEven(n - 1);
        }
        print isEven(10);
        print isOdd(10);
        "#,
        "true",
        "false"
    }

    tests! {
        recursion is OK
        r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(8);
        "#,
        "21"
    }

    tests! {
        nested_call_with_arguments is OK
        r#"
        fun greet(who) {
            return "hello " + who;
        }
        fun exclaim(message) {
            return message + "!";
        }
        print exclaim(greet("world"));
        "#,
        "hello world!"
    }

    tests! {
        printing_functions_shows_their_name is OK
        r#"
        fun foo() {}
        print foo;
        print clock;
        "#,
        "<fn foo>",
        "<native fn>"
    }

    tests! {
        parameters_are_independent_per_call is OK
        r#"
        fun double(n) {
            return n * 2;
        }
        for (var i = 0; i < 5; i = i + 1) {
            print double(i);
        }
        "#,
        "0",
        "2",
        "4",
        "6",
        "8"
    }
}
