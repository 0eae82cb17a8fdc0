//! `llore-gui`: opens the editor window.

fn main() {
    let code = exit_code(llore_gui::run());
    if code != 0 {
        std::process::exit(code);
    }
}

/// Maps the editor's run result to a process exit status, printing failures.
fn exit_code<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    if let Err(err) = result {
        eprintln!("llore editor error: {}", err);
        return 1;
    }
    0
}
