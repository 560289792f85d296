//! Command implementations for the lago CLI.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use lago_assets::AssetDir;
use lago_chart::{render_heatmap_svg, render_trend_svg};
use lago_core::date_window::DateWindow;
use lago_core::density;
use lago_core::image::{ImageVariant, ResolvedImage};
use lago_core::observation::DATE_FORMAT;
use lago_core::partition::partition;
use lago_core::report;
use lago_db::Database;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum Command {
    /// List the lakes present in the observations file
    Lakes {
        /// Observations CSV (lake,date,pixel,polygon)
        #[arg(long)]
        data: PathBuf,
    },
    /// Print the filtered series with its boundary captures
    Report {
        #[arg(long)]
        data: PathBuf,
        /// Root of the image asset tree
        #[arg(long)]
        assets: PathBuf,
        #[arg(long)]
        lake: String,
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// End date, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Image variant: raw or border
        #[arg(long)]
        itype: Option<String>,
        /// Directory to write the resolved boundary images into
        #[arg(long)]
        image_out: Option<PathBuf>,
    },
    /// Print the dated footprints for a range as JSON
    Polygons {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        lake: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Render the past/future water-level trend chart
    Trend {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        lake: String,
        /// Reference date for the past/future split; defaults to today
        #[arg(long)]
        reference: Option<String>,
        /// Output SVG path
        #[arg(long)]
        out: PathBuf,
    },
    /// Render the boundary-density heatmap for a range
    Heatmap {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        lake: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Output SVG path
        #[arg(long)]
        out: PathBuf,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Lakes { data } => {
            let db = load_database(&data)?;
            for lake in report::list_lakes(&db)? {
                println!("{lake}");
            }
            Ok(())
        }
        Command::Report {
            data,
            assets,
            lake,
            start,
            end,
            itype,
            image_out,
        } => {
            let db = load_database(&data)?;
            let asset_dir = AssetDir::new(assets);
            let window = DateWindow::parse(start.as_deref(), end.as_deref())?;
            let variant = ImageVariant::parse(itype.as_deref())?;
            let result = report::series_report(&db, &asset_dir, &lake, &window, variant)?;

            println!(
                "{}: {} observations, {} .. {}",
                result.lake, result.count, result.earliest_date, result.latest_date
            );
            for sample in &result.samples {
                println!("{}  {}", sample.date.format(DATE_FORMAT), sample.pixel);
            }
            describe_image("latest", &result.latest_image);
            describe_image("earliest", &result.earliest_image);

            if let Some(dir) = image_out {
                fs::create_dir_all(&dir)?;
                write_image(&dir, &result.lake, variant, &result.latest_image)?;
                write_image(&dir, &result.lake, variant, &result.earliest_image)?;
            }
            Ok(())
        }
        Command::Polygons {
            data,
            lake,
            start,
            end,
        } => {
            let db = load_database(&data)?;
            let window = DateWindow::parse(start.as_deref(), end.as_deref())?;
            let entries = report::polygon_history(&db, &lake, &window)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
        Command::Trend {
            data,
            lake,
            reference,
            out,
        } => {
            let db = load_database(&data)?;
            let reference = match reference.as_deref() {
                Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .with_context(|| format!("invalid reference date: {value}"))?,
                None => Local::now().naive_local().date(),
            };
            let series = report::fetch_series(&db, &lake, &DateWindow::unbounded())?;
            let split = partition(&series, reference);
            log::info!(
                "trend: {} past and {} future points around {}",
                split.past.len(),
                split.future.len(),
                reference
            );

            let mut svg = String::new();
            render_trend_svg(&lake, &split, &mut svg)
                .map_err(|e| anyhow::anyhow!("chart rendering failed: {e}"))?;
            fs::write(&out, svg)?;
            println!("wrote {}", out.display());
            Ok(())
        }
        Command::Heatmap {
            data,
            lake,
            start,
            end,
            out,
        } => {
            let db = load_database(&data)?;
            let window = DateWindow::parse(start.as_deref(), end.as_deref())?;
            let series = report::fetch_series(&db, &lake, &window)?;
            let map = density::aggregate(&series)?;
            log::info!(
                "heatmap: {} distinct coordinates from {} observations",
                map.points.len(),
                series.len()
            );

            let mut svg = String::new();
            render_heatmap_svg(&map, &mut svg)
                .map_err(|e| anyhow::anyhow!("chart rendering failed: {e}"))?;
            fs::write(&out, svg)?;
            println!("wrote {}", out.display());
            Ok(())
        }
    }
}

fn load_database(path: &Path) -> anyhow::Result<Database> {
    let csv_data = fs::read_to_string(path)
        .with_context(|| format!("failed to read observations file {}", path.display()))?;
    let db = Database::new()?;
    db.load_observations(&csv_data)?;
    Ok(db)
}

fn describe_image(label: &str, resolved: &ResolvedImage) {
    match &resolved.image {
        Some(bytes) => println!(
            "{label} image: {} ({} bytes)",
            resolved.date.format(DATE_FORMAT),
            bytes.len()
        ),
        None => println!(
            "{label} image: none available (anchor {})",
            resolved.date.format(DATE_FORMAT)
        ),
    }
}

fn write_image(
    dir: &Path,
    lake: &str,
    variant: ImageVariant,
    resolved: &ResolvedImage,
) -> anyhow::Result<()> {
    if let Some(bytes) = &resolved.image {
        let path = dir.join(format!(
            "{lake}-{variant}-{}.jpg",
            resolved.date.format(DATE_FORMAT)
        ));
        fs::write(&path, bytes)?;
        println!("saved {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_report_end_to_end_with_fallback_capture() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("observations.csv");
        fs::write(
            &data,
            concat!(
                "van,2024-03-01,10.0,\n",
                "van,2024-03-03,12.0,\n",
                "van,2024-03-05,15.0,\n",
            ),
        )
        .unwrap();

        let assets = tmp.path().join("assets");
        let raw = assets.join("raw").join("van");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("2024-03-03.jpg"), b"capture").unwrap();

        let image_out = tmp.path().join("out");
        run(Command::Report {
            data: data.clone(),
            assets,
            lake: "van".to_string(),
            start: None,
            end: None,
            itype: None,
            image_out: Some(image_out.clone()),
        })
        .unwrap();

        // Both anchors fall back onto the single 03-03 capture.
        let saved = image_out.join("van-raw-2024-03-03.jpg");
        assert!(saved.exists(), "resolved image should be written to disk");
    }

    #[test]
    fn run_heatmap_writes_an_svg() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("observations.csv");
        fs::write(
            &data,
            "van,2024-03-01,10.0,\"{\"\"coordinates\"\": [[[0.0, 0.0], [4.0, 0.0], [2.0, 3.0], [0.0, 0.0]]]}\"\n",
        )
        .unwrap();

        let out = tmp.path().join("heatmap.svg");
        run(Command::Heatmap {
            data,
            lake: "van".to_string(),
            start: None,
            end: None,
            out: out.clone(),
        })
        .unwrap();
        let svg = fs::read_to_string(out).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn run_rejects_an_inverted_window() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("observations.csv");
        fs::write(&data, "van,2024-03-01,10.0,\n").unwrap();

        let err = run(Command::Polygons {
            data,
            lake: "van".to_string(),
            start: Some("2024-03-05".to_string()),
            end: Some("2024-03-01".to_string()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("after end date"));
    }
}
