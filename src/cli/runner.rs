//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ApiConfig, FetchPolicy};
use crate::error::Result;
use crate::fetch::{CareerNetSource, PagedFetcher, PageSource};
use crate::http::HttpClient;
use crate::session::SessionContext;
use crate::types::SchoolRecord;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch => self.fetch().await,
            Commands::Search { query } => self.search(query).await,
            Commands::Check => self.check().await,
            Commands::Serve { port } => {
                let config = crate::cli::ServerConfig {
                    api: self.load_config()?,
                    policy: FetchPolicy::default(),
                };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Resolve the endpoint config from file, inline JSON, and flags
    fn load_config(&self) -> Result<ApiConfig> {
        let mut config = if let Some(raw) = &self.cli.config_json {
            ApiConfig::from_json(raw)?
        } else if let Some(path) = &self.cli.config {
            ApiConfig::from_file(path)?
        } else {
            ApiConfig::default()
        };
        if let Some(region) = &self.cli.region {
            config.region = Some(region.clone());
        }
        Ok(config)
    }

    fn build_fetcher(&self) -> Result<PagedFetcher<CareerNetSource>> {
        let config = self.load_config()?;
        PagedFetcher::careernet(config, FetchPolicy::default(), HttpClient::new())
    }

    async fn fetch(&self) -> Result<()> {
        let fetcher = self.build_fetcher()?;
        let mut session = SessionContext::default();
        let key = fetcher.source().config().region.clone();

        let records = session.load_schools(key, &fetcher).await?;

        if records.is_empty() {
            println!("No data found.");
            return Ok(());
        }
        println!("Fetched {} school records.", records.len());
        self.print_records(&records)
    }

    async fn search(&self, query: &str) -> Result<()> {
        let fetcher = self.build_fetcher()?;
        let mut session = SessionContext::default();
        let key = fetcher.source().config().region.clone();

        let records = session.load_schools(key, &fetcher).await?;
        let hits = session.search(&records, query);

        if hits.is_empty() {
            println!("No results for '{query}'. Try another keyword.");
            return Ok(());
        }
        println!("{} results for '{query}':", hits.len());
        let owned: Vec<SchoolRecord> = hits.into_iter().cloned().collect();
        self.print_records(&owned)
    }

    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let source = CareerNetSource::new(config, HttpClient::new())?;

        let body = source.fetch_page(1).await?;
        let page = crate::decode::parse_page(&body)?;

        println!(
            "Endpoint reachable: page 1 returned {} records{}",
            page.records.len(),
            page.total_count
                .map(|t| format!(" (advertised total: {t})"))
                .unwrap_or_default()
        );
        Ok(())
    }

    fn print_records(&self, records: &[SchoolRecord]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(records)?;
                println!("{json}");
            }
            OutputFormat::Pretty => {
                for record in records {
                    print_record(record);
                }
            }
        }
        Ok(())
    }
}

fn print_record(record: &SchoolRecord) {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "{} ({}) - {}",
        field(&record.school_name),
        field(&record.region),
        field(&record.major)
    );
    if let Some(subject) = &record.subject {
        println!("  curriculum:     {subject}");
    }
    if let Some(chart) = &record.chart {
        println!("  career paths:   {chart}");
    }
    if let Some(cert) = &record.cert {
        println!("  certifications: {cert}");
    }
}
