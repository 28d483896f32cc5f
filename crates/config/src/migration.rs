use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{DocumentMut, Item, Table, Value};

type Result<T> = std::result::Result<T, ConfigError>;

/// Legacy top-level keys named after the game-host cvars
const LEGACY_SERVERS_KEY: &str = "qlx_servers";
const LEGACY_SHOW_IN_CHAT_KEY: &str = "qlx_serversShowInChat";

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<qlstatus_events::EventBus>>,
) -> Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let (migrated, added_fields) = migrate_document(&content)?;

    // Only write if we changed something
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), migrated).await?;
        tracing::debug!(
            "Migrated {}: {}",
            path.as_ref().display(),
            added_fields.join(", ")
        );

        if let Some(event_bus) = events {
            event_bus.emit(qlstatus_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Returns the migrated document text and the list of changes applied
pub fn migrate_document(content: &str) -> Result<(String, Vec<String>)> {
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_status_section(&mut doc, &mut added_fields)?;
    migrate_servers_section(&mut doc, &mut added_fields)?;
    migrate_pacing_section(&mut doc, &mut added_fields)?;
    migrate_watch_section(&mut doc, &mut added_fields)?;

    Ok((doc.to_string(), added_fields))
}

fn migrate_status_section(doc: &mut DocumentMut, added_fields: &mut Vec<String>) -> Result<()> {
    let status = ensure_table(doc.as_table_mut(), "status", "status", added_fields)?;
    ensure_field(status, "endpoint", Value::from("https://a2s.c16t.uk/info"), added_fields);
    ensure_field(status, "timeout_secs", Value::from(10), added_fields);
    Ok(())
}

fn migrate_servers_section(doc: &mut DocumentMut, added_fields: &mut Vec<String>) -> Result<()> {
    let legacy_list = doc
        .get(LEGACY_SERVERS_KEY)
        .and_then(|item| item.as_str())
        .map(str::to_string);
    let legacy_show_in_chat = doc.get(LEGACY_SHOW_IN_CHAT_KEY).and_then(legacy_bool);

    let servers = ensure_table(doc.as_table_mut(), "servers", "servers", added_fields)?;

    if !servers.contains_key("list") {
        if let Some(list) = legacy_list {
            servers["list"] = Item::Value(Value::from(list));
            added_fields.push(format!("servers.list (migrated from {})", LEGACY_SERVERS_KEY));
        } else {
            servers["list"] = Item::Value(Value::from(""));
            added_fields.push("servers.list".to_string());
        }
    }

    if !servers.contains_key("show_in_chat") {
        if let Some(show) = legacy_show_in_chat {
            servers["show_in_chat"] = Item::Value(Value::from(show));
            added_fields.push(format!("servers.show_in_chat (migrated from {})", LEGACY_SHOW_IN_CHAT_KEY));
        } else {
            servers["show_in_chat"] = Item::Value(Value::from(false));
            added_fields.push("servers.show_in_chat".to_string());
        }
    }

    for key in [LEGACY_SERVERS_KEY, LEGACY_SHOW_IN_CHAT_KEY] {
        if doc.contains_key(key) {
            doc.remove(key);
            added_fields.push(format!("removed deprecated {}", key));
        }
    }

    Ok(())
}

fn migrate_pacing_section(doc: &mut DocumentMut, added_fields: &mut Vec<String>) -> Result<()> {
    let pacing = ensure_table(doc.as_table_mut(), "pacing", "pacing", added_fields)?;

    let chat = ensure_table(pacing, "chat", "pacing.chat", added_fields)?;
    ensure_field(chat, "batch_size", Value::from(10), added_fields);
    ensure_field(chat, "delay_ms", Value::from(500), added_fields);

    let irc = ensure_table(pacing, "irc", "pacing.irc", added_fields)?;
    ensure_field(irc, "batch_size", Value::from(1), added_fields);
    ensure_field(irc, "delay_ms", Value::from(2000), added_fields);

    Ok(())
}

fn migrate_watch_section(doc: &mut DocumentMut, added_fields: &mut Vec<String>) -> Result<()> {
    let watch = ensure_table(doc.as_table_mut(), "watch", "watch", added_fields)?;
    ensure_field(watch, "enabled", Value::from(true), added_fields);
    ensure_field(watch, "debounce_ms", Value::from(500), added_fields);
    ensure_field(watch, "reload_channel_size", Value::from(16), added_fields);
    Ok(())
}

/// Cvar booleans were stored as "0"/"1" strings
fn legacy_bool(item: &Item) -> Option<bool> {
    if let Some(b) = item.as_bool() {
        return Some(b);
    }
    if let Some(i) = item.as_integer() {
        return Some(i != 0);
    }
    item.as_str().map(|s| s.trim() != "0" && !s.trim().is_empty())
}

fn ensure_table<'a>(
    parent: &'a mut Table,
    key: &str,
    label: &str,
    added_fields: &mut Vec<String>,
) -> Result<&'a mut Table> {
    if !parent.contains_key(key) {
        let mut table = Table::new();
        table.set_implicit(true);
        parent.insert(key, Item::Table(table));
        added_fields.push(label.to_string());
    }

    parent[key]
        .as_table_mut()
        .ok_or_else(|| ConfigError::MigrationError(format!("Invalid [{}] section in config", label)))
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_CONFIG_TEMPLATE;
    use crate::Config;

    #[test]
    fn test_default_template_needs_no_migration() {
        let (_, added) = migrate_document(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(added.is_empty(), "unexpected changes: {:?}", added);
    }

    #[test]
    fn test_missing_sections_are_added() {
        let (migrated, added) = migrate_document("[servers]\nlist = \"a:1, b:2\"\n").unwrap();
        assert!(added.contains(&"status".to_string()));
        assert!(added.contains(&"pacing.irc".to_string()));

        let config = Config::parse(&migrated).unwrap();
        assert_eq!(config.servers_count(), 2);
        assert_eq!(config.status.timeout_secs, 10);
        assert_eq!(config.pacing.irc.batch_size.get(), 1);
        assert_eq!(config.pacing.irc.delay_ms, 2000);
        assert_eq!(config.pacing.chat.batch_size.get(), 10);
    }

    #[test]
    fn test_legacy_cvar_keys_are_moved() {
        let legacy = "qlx_servers = \"108.61.190.53:27960, il.qlrace.com:27961\"\nqlx_serversShowInChat = \"1\"\n";
        let (migrated, added) = migrate_document(legacy).unwrap();

        assert!(added.iter().any(|f| f.starts_with("servers.list (migrated")));
        assert!(added.contains(&"removed deprecated qlx_servers".to_string()));

        let doc = migrated.parse::<DocumentMut>().unwrap();
        assert!(!doc.contains_key(LEGACY_SERVERS_KEY));
        assert!(!doc.contains_key(LEGACY_SHOW_IN_CHAT_KEY));

        let config = Config::parse(&migrated).unwrap();
        assert!(config.servers.show_in_chat);
        let addresses = config.server_addresses().unwrap();
        assert_eq!(addresses[1].as_str(), "il.qlrace.com:27961");
    }

    #[tokio::test]
    async fn test_outdated_file_is_rewritten() {
        let path = std::env::temp_dir().join(format!("qlstatus-migrate-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[servers]\nlist = \"a:1\"\n").await.unwrap();

        migrate_config_if_needed(&path, None).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("delay_ms = 2000"), "file was: {}", written);
        let (_, added) = migrate_document(&written).unwrap();
        assert!(added.is_empty());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[test]
    fn test_existing_values_are_kept() {
        let content = "[servers]\nlist = \"a:1\"\nshow_in_chat = true\n\n[pacing.irc]\nbatch_size = 3\n";
        let (migrated, _) = migrate_document(content).unwrap();
        let config = Config::parse(&migrated).unwrap();
        assert!(config.servers.show_in_chat);
        assert_eq!(config.pacing.irc.batch_size.get(), 3);
        assert_eq!(config.pacing.irc.delay_ms, 2000);
    }
}
