use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use engine::catalog::{load_catalog, sample_catalog};
use engine::export::export_corpus;
use engine::{build_corpus, recommend, recommend_scored, Corpus, EngineConfig, SimilarityStrategy, StopWords, DEFAULT_K};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Build a content-similarity corpus and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Catalog path (JSON/JSONL file or directory); the demo catalog when omitted
    #[arg(long)]
    catalog: Option<String>,
    /// Drop tokens shorter than this many characters
    #[arg(long, default_value_t = 1)]
    min_term_length: usize,
    /// Keep English stop words
    #[arg(long, default_value_t = false)]
    no_stop_words: bool,
    /// Apply English stemming to terms
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Recompute similarity rows per query instead of storing the full matrix
    #[arg(long, default_value_t = false)]
    lazy: bool,
}

impl CorpusArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            min_term_length: self.min_term_length,
            stop_words: if self.no_stop_words { StopWords::None } else { StopWords::English },
            stem: self.stem,
            strategy: if self.lazy { SimilarityStrategy::Lazy } else { SimilarityStrategy::Dense },
            ..EngineConfig::default()
        }
    }

    fn build(&self) -> Result<Corpus> {
        let docs = match &self.catalog {
            Some(path) => load_catalog(path)?,
            None => sample_catalog(),
        };
        Ok(build_corpus(docs, &self.config())?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the corpus, log a summary, optionally export it
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Directory to write meta, vocabulary, documents and matrix to
        #[arg(long)]
        export: Option<String>,
    },
    /// Print the titles most similar to a title
    Recommend {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        title: String,
        #[arg(short, long, default_value_t = DEFAULT_K as i64, allow_negative_numbers = true)]
        k: i64,
        /// Print scores next to titles
        #[arg(long, default_value_t = false)]
        scores: bool,
        /// Emit JSON instead of plain lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, export } => {
            let built = corpus.build()?;
            println!("documents: {}", built.len());
            println!("vocabulary: {}", built.vocabulary().len());
            let zero = built.vectors().iter().filter(|v| v.is_zero()).count();
            println!("documents without terms: {zero}");
            if let Some(dir) = export {
                export_corpus(&built, &dir)?;
                println!("exported to {dir}");
            }
            Ok(())
        }
        Commands::Recommend { corpus, title, k, scores, json } => {
            let built = corpus.build()?;
            if scores || json {
                let recs = recommend_scored(&built, &title, k)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&recs)?);
                } else {
                    for r in recs { println!("{:.4}\t{}", r.score, r.title); }
                }
            } else {
                for t in recommend(&built, &title, k)? { println!("{t}"); }
            }
            Ok(())
        }
    }
}
