use anyhow::{Context, Result};
use search_core::{
    remove_duplicates, DocId, Document, DocumentStatus, ExecutionMode, Rating, SearchConfig,
    SearchServer,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One document of an input corpus file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub id: DocId,
    pub found: bool,
    pub terms: Vec<String>,
    pub status: Option<DocumentStatus>,
}

/// Collect `.json` / `.jsonl` files under `input` (a file or a directory), sorted by path.
pub fn corpus_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            let ext = p.extension().and_then(|s| s.to_str());
            if p.is_file() && matches!(ext, Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Read every document of a corpus file or directory.
pub fn load_corpus(input: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in corpus_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::info!(num_docs = docs.len(), input = %input.display(), "corpus loaded");
    Ok(docs)
}

fn open(file: &Path) -> Result<BufReader<File>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    Ok(BufReader::new(f))
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = open(file)?;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), line_no + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = open(file)?;
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "skipping file without documents"),
    }
    Ok(())
}

/// Index the documents. Rejected documents are logged and skipped unless `strict`.
pub fn build_server(
    stop_words: &str,
    config: SearchConfig,
    docs: &[InputDoc],
    strict: bool,
) -> Result<SearchServer> {
    let mut server = SearchServer::with_config(stop_words.split(' '), config)?;
    for doc in docs {
        if let Err(err) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            if strict {
                return Err(err).with_context(|| format!("adding document {}", doc.id));
            }
            tracing::warn!(doc_id = doc.id, %err, "document skipped");
        }
    }
    Ok(server)
}

pub fn run_queries(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    mode: ExecutionMode,
) -> Result<Vec<QueryOutput>> {
    let mut out = Vec::with_capacity(queries.len());
    for query in queries {
        let start = std::time::Instant::now();
        let results = server.find_top_documents_with(mode, query, move |_, s, _| s == status)?;
        out.push(QueryOutput {
            query: query.clone(),
            took_s: start.elapsed().as_secs_f64(),
            results,
        });
    }
    Ok(out)
}

pub fn run_match(
    server: &SearchServer,
    query: &str,
    id: DocId,
    mode: ExecutionMode,
) -> Result<MatchOutput> {
    Ok(match server.match_document_with(mode, query, id)? {
        Some((terms, status)) => MatchOutput { id, found: true, terms, status: Some(status) },
        None => MatchOutput { id, found: false, terms: Vec::new(), status: None },
    })
}

pub fn run_dedup(server: &mut SearchServer) -> Vec<DocId> {
    remove_duplicates(server)
}
