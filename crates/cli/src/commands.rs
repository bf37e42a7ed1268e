//! Subcommand handlers: translate parsed arguments into SDK calls and print
//! the results as JSON on stdout.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use model::{
    ArticleQuery, AuthScheme, ChangelogFilters, CreateWebhook, Cursor, EventName, LawFilters,
    PageRequest, SearchFilters, WebhookId,
};
use sdk::config::API_KEY_ENV;
use sdk::{Client, ClientConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::{
    BulkCommand, ChangelogArgs, Cli, Commands, ExportCommand, LawsCommand, PageArgs, SearchArgs,
    WebhooksCommand,
};

/// Builds the client from global flags.
pub fn client(cli: &Cli) -> Result<Client> {
    let scheme = if cli.bearer {
        AuthScheme::Bearer
    } else {
        AuthScheme::ApiKey
    };
    let api_key = cli
        .api_key
        .clone()
        .with_context(|| format!("missing credential: pass --api-key or set {API_KEY_ENV}"))?;
    let mut builder = ClientConfig::builder(api_key).auth_scheme(scheme);
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(millis) = cli.timeout_ms {
        builder = builder.timeout(Duration::from_millis(millis));
    }
    let config = builder.build().context("invalid client configuration")?;
    Ok(Client::new(config)?)
}

pub async fn run(client: &Client, command: Commands) -> Result<()> {
    match command {
        Commands::Laws(args) => laws(client, args.command).await,
        Commands::Search(args) => search(client, args).await,
        Commands::Bulk(args) => bulk(client, args.command).await,
        Commands::Export(args) => export(client, args.command).await,
        Commands::Webhooks(args) => webhooks(client, args.command).await,
        Commands::Changelog(args) => changelog(client, args).await,
        Commands::Stats => print_json(&client.stats().get().await?),
    }
}

fn page_request(page: PageArgs) -> PageRequest {
    PageRequest {
        page: page.page,
        page_size: page.page_size,
    }
}

async fn laws(client: &Client, command: LawsCommand) -> Result<()> {
    match command {
        LawsCommand::List {
            country,
            jurisdiction,
            law_type,
            domain,
            status,
            year,
            ordering,
            page,
        } => {
            let filters = LawFilters {
                country,
                jurisdiction,
                law_type,
                domain,
                status,
                year,
                ordering,
            };
            print_json(&client.laws().list(&filters, &page_request(page)).await?)
        }
        LawsCommand::Get { id } => print_json(&client.laws().get(&id).await?),
        LawsCommand::Articles { id, page } => {
            print_json(&client.laws().articles(&id, &page_request(page)).await?)
        }
    }
}

async fn search(client: &Client, args: SearchArgs) -> Result<()> {
    let filters = SearchFilters {
        domain: args.domain,
        country: args.country,
        law_type: args.law_type,
        status: args.status,
        date_from: args.date_from,
        date_to: args.date_to,
        sort: args.sort,
        page: args.page.page,
        page_size: args.page.page_size,
    };
    print_json(&client.search().search(&args.query, &filters).await?)
}

async fn bulk(client: &Client, command: BulkCommand) -> Result<()> {
    let BulkCommand::Articles {
        cursor,
        page_size,
        law_id,
        domain,
        updated_since,
        max_pages,
    } = command;
    let params = ArticleQuery {
        cursor: cursor.and_then(Cursor::new),
        page_size,
        law_id,
        domain,
        updated_since,
    };

    let batches = client
        .bulk()
        .articles(params)
        .into_stream()
        .take(max_pages.unwrap_or(usize::MAX));
    let mut batches = std::pin::pin!(batches);

    let stdout = std::io::stdout();
    let mut total = 0usize;
    while let Some(batch) = batches.next().await {
        let mut out = stdout.lock();
        for article in batch? {
            serde_json::to_writer(&mut out, &article)?;
            out.write_all(b"\n")?;
            total += 1;
        }
        out.flush()?;
    }
    info!(articles = total, "bulk export finished");
    Ok(())
}

async fn export(client: &Client, command: ExportCommand) -> Result<()> {
    match command {
        ExportCommand::Download { id, format, output } => {
            let download = client.export().download(&id, &format).await?;
            let target = output.unwrap_or_else(|| download.filename.clone().into());
            let written = download
                .response
                .save_to(&target)
                .await
                .with_context(|| format!("failed to save export to {}", target.display()))?;
            print_json(&serde_json::json!({
                "path": target.display().to_string(),
                "bytes": written,
            }))
        }
        ExportCommand::Quota { id } => print_json(&client.export().quota(&id).await?),
    }
}

async fn webhooks(client: &Client, command: WebhooksCommand) -> Result<()> {
    let webhooks = client.webhooks();
    match command {
        WebhooksCommand::Create {
            url,
            events,
            domain,
        } => {
            let events = events.into_iter().filter_map(EventName::new).collect();
            let request = CreateWebhook {
                url,
                events,
                domain_filter: domain,
            };
            print_json(&webhooks.create(&request).await?)
        }
        WebhooksCommand::List => print_json(&webhooks.list().await?),
        WebhooksCommand::Delete { id } => {
            webhooks.delete(WebhookId::new(id)).await?;
            info!(webhook_id = id, "webhook deleted");
            Ok(())
        }
        WebhooksCommand::Test { id } => print_json(&webhooks.test(WebhookId::new(id)).await?),
    }
}

async fn changelog(client: &Client, args: ChangelogArgs) -> Result<()> {
    let filters = ChangelogFilters {
        since: args.since,
        law_id: args.law_id,
        change_type: args.change_type,
    };
    print_json(
        &client
            .changelog()
            .list(&filters, &page_request(args.page))
            .await?,
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    #[test]
    fn test_client_requires_credential() {
        let cli = parse(&["normativa", "stats"]);
        if cli.api_key.is_some() {
            // Credential supplied through the environment.
            return;
        }
        let err = client(&cli).unwrap_err();
        assert!(err.to_string().contains("--api-key"));
    }

    #[test]
    fn test_client_applies_global_flags() {
        let cli = parse(&[
            "normativa",
            "stats",
            "--api-key",
            "k",
            "--bearer",
            "--base-url",
            "http://localhost:9000/api/v1/",
            "--timeout-ms",
            "250",
        ]);
        let client = client(&cli).expect("client");
        assert_eq!(client.config().api_key(), "k");
        assert_eq!(client.config().auth_scheme(), AuthScheme::Bearer);
        assert_eq!(client.config().base_url(), "http://localhost:9000/api/v1");
        assert_eq!(client.config().timeout(), Duration::from_millis(250));
    }
}
