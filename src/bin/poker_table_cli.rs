// src/bin/poker_table_cli.rs
//
// Дев-CLI: команды стола построчно из stdin в JSON, на каждую строку –
// состояние стола в stdout.
//
//   echo '{"AddPlayer":{"player_id":1,"stack":100}}' | poker_table_cli [config.json]
//
// Строки, начинающиеся с '#', и пустые строки пропускаются. Отдельная
// строка `{"Award":[[1],[2,3]]}` раздаёт банки на шоудауне.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};

use serde::Deserialize;

use poker_table::api::{build_table_view, Command};
use poker_table::domain::{PlayerId, TableConfig};
use poker_table::engine::{apply, TableState};

/// Строка входа: команда стола или выплата банков.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputLine {
    Command(Command),
    Award { #[serde(rename = "Award")] ranking: Vec<Vec<PlayerId>> },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TableConfig::from_json(&fs::read_to_string(&path)?)?,
        None => TableConfig::default(),
    };
    log::info!("poker_table_cli: стол на {} мест", config.max_seats);

    let mut table = TableState::with_system_deck(config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let input: InputLine = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(err) => {
                writeln!(out, "{}", serde_json::json!({ "error": err.to_string() }))?;
                continue;
            }
        };

        let outcome = match input {
            InputLine::Command(command) => apply(&mut table, command).map(|()| Vec::new()),
            InputLine::Award { ranking } => table.award_pots(&ranking),
        };

        match outcome {
            Ok(payouts) => {
                let view = build_table_view(&table, |_| true);
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "table": view, "payouts": payouts })
                )?;
            }
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => writeln!(out, "{}", serde_json::json!({ "error": err.to_string() }))?,
        }
    }

    Ok(())
}
