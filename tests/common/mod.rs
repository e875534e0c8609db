/// Runs inline Lox source and asserts on its observable behavior.
///
/// `is OK` cases drive the interpreter in-process against an in-memory
/// writer and assert on `print` output. `is ERR` cases spawn the real
/// `lox` binary (via `assert_cmd`) against a temp file and assert on its
/// stderr and failing exit status — the diagnostic format is part of the
/// external contract, so it's worth checking it through the real process
/// at least once per error case.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr, $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use lox_lang::Lox;

            let mut expected_lines: Vec<&str> = vec![$($expected),*];
            let expected = if expected_lines.is_empty() {
                String::new()
            } else {
                expected_lines.push("");
                expected_lines.join("\n")
            };

            let mut output: Vec<u8> = Vec::new();
            let mut lox = Lox::new(&mut output);
            lox.run_source($source);
            assert!(!lox.had_error(), "expected no compile-time diagnostics");
            assert!(!lox.had_runtime_error(), "expected no runtime error");
            drop(lox);

            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($name:ident is ERR $source:expr, $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let mut path = std::env::temp_dir();
            path.push(format!("lox-test-{}-{}.lox", std::process::id(), stringify!($name)));
            std::fs::write(&path, $source).expect("write temp script");

            let expected = vec![$($expected),*].join("\n");

            Command::cargo_bin("lox")
                .unwrap()
                .arg(&path)
                .assert()
                .stderr(format!("{expected}\n"))
                .failure();

            let _ = std::fs::remove_file(&path);
        }
    };
}
