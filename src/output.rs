use anyhow::Context;
use nhl_api::{Batch, EnrichedEvent};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffered writer to a file, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// One JSON object per line. Returns the number of lines written.
pub fn write_ndjson<W: Write>(events: &[EnrichedEvent], mut out: W) -> anyhow::Result<usize> {
    for event in events {
        serde_json::to_writer(&mut out, event).with_context(|| {
            format!("writing game {} event {}", event.game_id, event.event_index)
        })?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(events.len())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer(&mut out, value).with_context(|| format!("writing {}", path.display()))?;
    out.flush()?;
    Ok(())
}

pub fn read_snapshot(path: &Path) -> anyhow::Result<Batch> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a snapshot", path.display()))
}
