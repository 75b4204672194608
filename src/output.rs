// WHY: sentence files are the tool's only artifact; naming and layout live here

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Suffix appended to the input stem to name its sentence file
pub const OUTPUT_SUFFIX: &str = "_sentences.txt";

/// How sentences are laid out in the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// One sentence per line
    #[default]
    Lines,
    /// Each sentence followed by a blank line; re-splitting yields the same sentences
    Blocks,
}

/// Output path for a source document
/// Goes next to the source unless `output_dir` is given.
pub fn generate_output_path(source_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    let file_name = format!("{file_stem}{OUTPUT_SUFFIX}");

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source_path.with_file_name(file_name),
    }
}

/// Render sentences in the requested layout, newline-terminated
pub fn format_sentences<S: AsRef<str>>(sentences: &[S], layout: OutputLayout) -> String {
    let separator = match layout {
        OutputLayout::Lines => "\n",
        OutputLayout::Blocks => "\n\n",
    };
    let mut rendered = String::with_capacity(sentences.iter().map(|s| s.as_ref().len() + 2).sum());
    for sentence in sentences {
        rendered.push_str(sentence.as_ref());
        rendered.push_str(separator);
    }
    rendered
}

/// Write sentences to any async sink
pub async fn write_sentences<W, S>(writer: W, sentences: &[S], layout: OutputLayout) -> Result<()>
where
    W: AsyncWrite + Unpin,
    S: AsRef<str>,
{
    let mut writer = BufWriter::new(writer);
    writer.write_all(format_sentences(sentences, layout).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Write sentences to a file, creating its parent directory when needed
pub async fn write_sentence_file<S: AsRef<str>>(path: &Path, sentences: &[S], layout: OutputLayout) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_sentences(file, sentences, layout).await
}
