use crate::{DocId, DocumentStatus, SearchConfig, SearchServer};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Layout of a `.json` corpus file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusFile {
    #[serde(default)]
    pub stop_words: String,
    pub documents: Vec<InputDoc>,
}

/// Read one line without its trailing newline; None at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let trimmed = buf.trim_end_matches(['\n', '\r']).len();
    buf.truncate(trimmed);
    Ok(Some(buf))
}

/// Build a server from the line format: a stop-word line, a document count
/// line, then that many document lines. Documents get ids 0, 1, 2, ...
pub fn read_line_corpus<R: BufRead>(reader: &mut R, config: SearchConfig) -> Result<SearchServer> {
    let mut server = SearchServer::with_config(config);
    let stop_words = read_line(reader)?.context("missing stop words line")?;
    server.set_stop_words(&stop_words)?;

    let count_line = read_line(reader)?.context("missing document count line")?;
    let count: u32 = count_line
        .trim()
        .parse()
        .with_context(|| format!("invalid document count {count_line:?}"))?;
    for doc_id in 0..count {
        let Some(text) = read_line(reader)? else {
            bail!("expected {count} documents, input ended after {doc_id}");
        };
        server.add_document(doc_id, &text)?;
    }
    tracing::info!(num_docs = server.document_count(), "loaded line corpus");
    Ok(server)
}

fn ingest(server: &mut SearchServer, doc: InputDoc) -> Result<()> {
    server
        .add_document_with(doc.id, &doc.text, doc.status, &doc.ratings)
        .with_context(|| format!("indexing document {}", doc.id))
}

fn load_jsonl(path: &Path, server: &mut SearchServer) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", path.display(), line_no + 1))?;
        ingest(server, doc)?;
    }
    Ok(())
}

fn load_json(path: &Path, server: &mut SearchServer) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let corpus: CorpusFile = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    server.set_stop_words(&corpus.stop_words)?;
    for doc in corpus.documents {
        ingest(server, doc)?;
    }
    Ok(())
}

/// Build a server from a `.json` corpus file or a `.jsonl` file of documents.
///
/// `extra_stop_words` are applied before the file's own stop words; for
/// `.jsonl` input they are the only source of stop words.
pub fn load_corpus_file<P: AsRef<Path>>(path: P, extra_stop_words: Option<&str>, config: SearchConfig) -> Result<SearchServer> {
    let path = path.as_ref();
    let mut server = SearchServer::with_config(config);
    if let Some(text) = extra_stop_words {
        server.set_stop_words(text)?;
    }
    match path.extension().and_then(|s| s.to_str()) {
        Some("jsonl") => load_jsonl(path, &mut server)?,
        Some("json") => load_json(path, &mut server)?,
        _ => bail!("unsupported corpus file {}; expected .json or .jsonl", path.display()),
    }
    tracing::info!(path = %path.display(), num_docs = server.document_count(), num_words = server.index().word_count(), "loaded corpus");
    Ok(server)
}
