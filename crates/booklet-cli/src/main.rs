mod logger;

use anyhow::{Context, Result};
use booklet_impose::{
    ImpositionOptions, OutputLayout, Page, PageContent, PaperSize, ScalingMode, SourceId,
    WorkingSet,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "booklet", about = "Booklet imposition for PDFs and images", version)]
struct Cli {
    /// Log pipeline progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose pages onto sheets and write the PDF
    Impose {
        /// Output PDF file
        #[arg(short, long, required_unless_present = "stats_only")]
        output: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Number of concurrent source decodes
        #[arg(long)]
        jobs: Option<usize>,

        /// Give up if composition takes longer than this
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print which page lands on which sheet
    Plan {
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Input and layout options shared by all subcommands
#[derive(Args)]
struct LayoutArgs {
    /// Input PDF, PNG or JPEG file(s) - can specify multiple
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Options file (JSON); flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pages per sheet
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Pages per signature (multiples of 4; anything else means 4)
    #[arg(long)]
    group_size: Option<usize>,

    /// Bleed around the content in mm
    #[arg(long)]
    bleed_mm: Option<f32>,

    /// Reference paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Scaling mode for the chosen layout
    #[arg(long, value_enum)]
    scaling: Option<ScalingArg>,

    /// Pad the page list with blank pages to whole signatures
    #[arg(long)]
    pad: bool,

    /// Number of blank pages to append before padding
    #[arg(long, default_value = "0")]
    append_blank: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    SingleUp,
    TwoUp,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fit,
    Fill,
}

impl From<LayoutArg> for OutputLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::SingleUp => Self::SingleUp,
            LayoutArg::TwoUp => Self::TwoUp,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<ScalingArg> for ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fit => Self::Fit,
            ScalingArg::Fill => Self::Fill,
        }
    }
}

impl LayoutArgs {
    /// Options from the config file (or defaults) with flags applied on top
    async fn options(&self) -> Result<ImpositionOptions> {
        let mut options = match &self.config {
            Some(path) => ImpositionOptions::load(path)
                .await
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => ImpositionOptions::default(),
        };

        if let Some(layout) = self.layout {
            options.layout = layout.into();
        }
        if let Some(group_size) = self.group_size {
            options.group_size = group_size;
        }
        if let Some(bleed_mm) = self.bleed_mm {
            options.bleed_mm = bleed_mm;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(scaling) = self.scaling {
            match options.layout {
                OutputLayout::SingleUp => options.single_up_scaling = scaling.into(),
                OutputLayout::TwoUp => options.two_up_scaling = scaling.into(),
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Load every input and apply the blank page flags
    async fn working_set(&self, options: &ImpositionOptions) -> Result<WorkingSet> {
        let mut working_set = WorkingSet::new();
        for path in &self.input {
            let added = working_set
                .ingest_file(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?;
            log::info!("Loaded {} ({} pages)", path.display(), added);
        }

        for _ in 0..self.append_blank {
            working_set.add_filler();
        }
        if self.pad {
            let added = working_set.pad_to_group(options.group_size);
            log::info!("Padded with {} blank pages", added);
        }

        Ok(working_set)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Impose {
            output,
            save_config,
            jobs,
            timeout_secs,
            stats_only,
            layout,
        } => {
            let mut options = layout.options().await?;
            if let Some(jobs) = jobs {
                options.max_concurrent_decodes = jobs;
                options.validate()?;
            }

            if let Some(path) = &save_config {
                options.save(path).await?;
                log::info!("Saved options to {}", path.display());
            }

            let working_set = layout.working_set(&options).await?;

            // Calculate and show statistics
            let stats = booklet_impose::calculate_statistics(working_set.len(), &options)?;
            println!("Imposition Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Blank pages added: {}", stats.filler_pages_added);
            println!("  Output sheets: {}", stats.output_sheets);
            if let Some(physical) = stats.physical_sheets {
                println!("  Physical sheets: {}", physical);
            }
            if let Some(sigs) = stats.signatures {
                println!("  Signatures: {}", sigs);
            }

            if stats_only {
                return Ok(());
            }
            let Some(output) = output else {
                anyhow::bail!("an output file is required");
            };

            // Perform imposition
            let order = booklet_impose::print_order(working_set.pages(), &options);
            let composition = match timeout_secs {
                Some(secs) => {
                    booklet_impose::compose_with_timeout(
                        &order,
                        working_set.sources(),
                        &options,
                        Duration::from_secs(secs),
                    )
                    .await?
                }
                None => booklet_impose::compose(&order, working_set.sources(), &options).await?,
            };

            for skipped in &composition.skipped {
                eprintln!(
                    "  Sheet {} {:?}: skipped ({})",
                    skipped.sheet + 1,
                    skipped.slot,
                    skipped.reason
                );
            }

            booklet_impose::save_pdf(&composition.bytes, &output).await?;
            println!(
                "Imposed {} pages onto {} sheets → {}",
                composition.placed,
                composition.sheets,
                output.display()
            );
        }

        Commands::Plan { layout } => {
            let options = layout.options().await?;
            let working_set = layout.working_set(&options).await?;

            for sheet in booklet_impose::sheet_plan(working_set.pages(), &options) {
                let slots: Vec<String> = sheet
                    .slots
                    .iter()
                    .map(|planned| {
                        let label = planned
                            .page
                            .as_ref()
                            .map(|page| page_label(&working_set, page))
                            .unwrap_or_else(|| "-".to_string());
                        format!("{:?}: {}", planned.slot, label)
                    })
                    .collect();
                println!("Sheet {:>3}  {}", sheet.index + 1, slots.join("  "));
            }
        }
    }

    Ok(())
}

/// Short description of a page for the sheet plan
fn page_label(working_set: &WorkingSet, page: &Page) -> String {
    let name = |source: SourceId| {
        working_set
            .sources()
            .get(source)
            .and_then(|unit| unit.name.clone())
            .unwrap_or_else(|| source.to_string())
    };

    match page.content {
        PageContent::Document { source, index } => format!("{} p{}", name(source), index + 1),
        PageContent::Image { source } => name(source),
        PageContent::Filler => "blank".to_string(),
    }
}
