//! Support for the single-dash long flags (`-smile_dir`) used by the
//! pipeline's driver scripts.
//!
//! clap only understands multi-character flags with a double dash, so known
//! flag names are rewritten before parsing. Anything that is not a known
//! flag name, such as the value `-1` for an iteration number, is left alone.

/// Rewrite `-name` and `-name=value` to `--name` / `--name=value` for every
/// `name` in `known`. The first element (the program name) is never touched.
pub fn normalise<I, S>(args: I, known: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || arg.starts_with("--") {
                return arg;
            }
            match arg.strip_prefix('-') {
                Some(rest) => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if known.contains(&name) {
                        format!("-{}", arg)
                    } else {
                        arg
                    }
                }
                None => arg,
            }
        })
        .collect()
}
