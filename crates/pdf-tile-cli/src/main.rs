mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-tile", about = "Tile copies of a PDF page onto one sheet", version)]
struct Cli {
    /// Log layout and composition details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile the first page of a PDF onto a single output page
    Tile {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (default: <copies>-up-<input name> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Load options from a JSON config file; flags given explicitly override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective options to a JSON config file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Output page format
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,

        /// Copies per page
        #[arg(long, value_enum, conflicts_with_all = ["columns", "rows"])]
        copies: Option<CopiesArg>,

        /// Columns of a custom grid (use with --rows)
        #[arg(long, requires = "rows")]
        columns: Option<usize>,

        /// Rows of a custom grid (use with --columns)
        #[arg(long, requires = "columns")]
        rows: Option<usize>,

        /// Page margin in points
        #[arg(long)]
        margin: Option<f64>,

        /// Print the tile placements, don't generate PDF
        #[arg(long)]
        plan_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    LetterPortrait,
    LetterLandscape,
    A4Portrait,
    A4Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum CopiesArg {
    #[value(name = "1")]
    One,
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
    #[value(name = "9")]
    Nine,
}

impl From<LayoutArg> for pdf_tile::PageLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::LetterPortrait => Self::LetterPortrait,
            LayoutArg::LetterLandscape => Self::LetterLandscape,
            LayoutArg::A4Portrait => Self::A4Portrait,
            LayoutArg::A4Landscape => Self::A4Landscape,
        }
    }
}

impl From<CopiesArg> for pdf_tile::CopiesPerPage {
    fn from(arg: CopiesArg) -> Self {
        match arg {
            CopiesArg::One => Self::One,
            CopiesArg::Four => Self::Four,
            CopiesArg::Eight => Self::Eight,
            CopiesArg::Nine => Self::Nine,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Tile {
            input,
            output,
            config,
            save_config,
            layout,
            copies,
            columns,
            rows,
            margin,
            plan_only,
        } => {
            let mut options = match &config {
                Some(path) => pdf_tile::TileOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => pdf_tile::TileOptions::default(),
            };
            if let Some(layout) = layout {
                options.layout = layout.into();
            }
            if let Some(copies) = copies {
                options.grid = pdf_tile::CopiesPerPage::from(copies).grid_shape();
            }
            if let (Some(columns), Some(rows)) = (columns, rows) {
                options.grid = pdf_tile::GridShape::new(columns, rows)?;
            }
            if let Some(margin) = margin {
                options.margin_pt = margin;
            }
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                println!("Saved options → {}", path.display());
            }

            let source_bytes = pdf_tile::load_source(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;

            if plan_only {
                let source = pdf_tile::SourceDocument::parse(&source_bytes)?;
                if source.page_count() == 0 {
                    return Err(pdf_tile::TileError::EmptySource.into());
                }
                let plan = pdf_tile::plan(source.page_size(0)?, &options.layout_options())?;
                print_plan(&plan);
                return Ok(());
            }

            let output = output
                .unwrap_or_else(|| pdf_tile::tiled_output_path(&input, options.tile_count()));
            let composed = pdf_tile::compose_async(source_bytes, options).await?;
            pdf_tile::save_output(&composed, &output).await?;
            println!("Tiled {} copies → {}", options.tile_count(), output.display());
        }
    }

    Ok(())
}

fn print_plan(plan: &pdf_tile::Plan) {
    println!("Tile plan:");
    println!("  Grid: {}x{}", plan.grid.columns, plan.grid.rows);
    println!("  Scale: {:.4}", plan.scale);
    for (idx, placement) in plan.iter().enumerate() {
        println!(
            "  #{}: x={:.2} y={:.2} w={:.2} h={:.2}",
            idx + 1,
            placement.x,
            placement.y,
            placement.scaled_width,
            placement.scaled_height
        );
    }
}
