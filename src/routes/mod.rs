mod health_check;
mod subscribe;
pub use health_check::*;
pub use subscribe::*;

/// Walk an error's `source` chain, so that the `Debug` output of our error
/// enums (which is what `TracingLogger` records) shows the root cause.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}
