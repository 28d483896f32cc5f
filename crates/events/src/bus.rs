use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                if self.silent_mode {
                    return;
                }
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "qlstatus - Server Status Relay".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { endpoint } => {
                if self.silent_mode {
                    tracing::info!("Ready, status endpoint {}", endpoint);
                    return;
                }
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Endpoint".white(), endpoint.cyan());
                println!("  {} {}", "Input   ".white(), "<player>: !servers | irc <nick>: !servers".dimmed());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                if !self.silent_mode {
                    println!("\n{}", "Shutting down".red());
                }
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                if !self.silent_mode {
                    println!("  {} {}", "Loading config".dimmed(), path.cyan());
                }
            }
            AppEvent::ConfigLoaded { servers_count } => {
                if self.silent_mode {
                    return;
                }
                if servers_count == 0 {
                    println!("  {} No servers configured", "⚠".yellow());
                } else {
                    println!("  {} {} server(s)", "✓".green(), servers_count.to_string().cyan());
                }
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() && !self.silent_mode {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }
            AppEvent::ConfigReloaded { servers_count } => {
                tracing::info!("Configuration reloaded successfully ({} server(s))", servers_count);
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }

            // Commands
            AppEvent::CommandRejected { caller, reason } => {
                tracing::warn!("servers command from {} rejected: {}", caller, reason);
            }
            AppEvent::StatusQueued { caller, servers } => {
                tracing::debug!("Status of {} server(s) queued for {}", servers, caller);
            }

            // Status reports
            AppEvent::StatusFetched { servers, failed, duration } => {
                if failed > 0 {
                    tracing::info!("Fetched {} server(s), {} unreachable, in {:?}", servers, failed, duration);
                } else {
                    tracing::info!("Fetched {} server(s) in {:?}", servers, duration);
                }
            }
            AppEvent::StatusFailed { error } => {
                tracing::error!("Status query failed: {}", error);
            }
            AppEvent::ReportDelivered { lines, duration } => {
                tracing::debug!("Delivered {} line(s) in {:?}", lines, duration);
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
