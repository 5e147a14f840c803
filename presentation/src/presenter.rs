use colored::Colorize;
use domain::models::Citation;
use domain::services::FragmentStream;
use futures::StreamExt;
use shared::types::Result;
use std::io::Write;

/// Writes a streamed answer and its citations to a console.
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_banner(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}\n", "Response:".bold())?;
        Ok(())
    }

    /// Print fragments as they arrive, then the citations. A failed stream
    /// leaves what was already printed and returns before any citation.
    pub async fn present(&mut self, fragments: FragmentStream, citations: &[Citation]) -> Result<()> {
        self.write_stream(fragments).await?;
        self.write_citations(citations)
    }

    pub async fn write_stream(&mut self, mut fragments: FragmentStream) -> Result<()> {
        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            self.out.write_all(fragment.as_bytes())?;
            self.out.flush()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn write_citations(&mut self, citations: &[Citation]) -> Result<()> {
        if citations.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(self.out, "Citations:")?;
        for citation in citations {
            writeln!(self.out, "Title: {}", citation.title)?;
            writeln!(self.out, "Parent ID: {}", citation.parent_id)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
