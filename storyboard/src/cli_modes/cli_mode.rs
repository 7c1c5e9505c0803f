/// Whether a mode handled the invocation or left it for the next one.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
