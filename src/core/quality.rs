use crate::config::AUDIO_QUALITY;
use crate::core::error::{DownloadError, Result};
use crate::core::Stream;
use std::io::{BufRead, Write};

/// Picks one quality label out of the available ones. The answer is checked
/// by [`negotiate_quality`], resolvers only have to produce a candidate.
pub trait QualityResolver {
    fn resolve(&mut self, available: &[String]) -> Result<String>;
}

/// Quality given up front, e.g. with `-q 720p`.
pub struct Preselected(pub String);

impl QualityResolver for Preselected {
    fn resolve(&mut self, _available: &[String]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Lists the choices and reads one line of input. Blocks without timeout.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> QualityResolver for Prompt<R, W> {
    fn resolve(&mut self, available: &[String]) -> Result<String> {
        writeln!(self.output, "Available qualities: {}", available.join(" "))?;
        write!(self.output, "Choose quality: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DownloadError::NoQualityChosen);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Advertised labels plus the implicit audio-only option, in server order.
pub fn available_qualities(stream: &Stream) -> Vec<String> {
    let mut qualities = stream.quality_labels();
    if !qualities.iter().any(|q| q == AUDIO_QUALITY) {
        qualities.push(AUDIO_QUALITY.to_string());
    }
    qualities
}

/// Asks `resolver` for a quality and accepts it only on an exact,
/// case-sensitive match against `available`.
pub fn negotiate_quality(
    available: &[String],
    resolver: &mut dyn QualityResolver,
) -> Result<String> {
    let requested = resolver.resolve(available)?;
    if available.iter().any(|q| *q == requested) {
        Ok(requested)
    } else {
        Err(DownloadError::QualityUnavailable {
            requested,
            available: available.to_vec(),
        })
    }
}
