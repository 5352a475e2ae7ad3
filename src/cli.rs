use camino::Utf8PathBuf;
use clap::Parser;
use layer_namer::config::DEFAULT_SETTINGS_SLOT;
use layer_namer::models::RenameOptionsUpdate;

/// layer-namer: give generated layer names meaningful labels
#[derive(Parser, Debug)]
#[command(name = "layer-namer", version)]
#[command(about = "Rename the layers of a scene document the way the panel's RENAME button does", long_about = None)]
pub struct Cli {
    /// Scene document (JSON array of roots, or {"selection": [...]})
    pub document: Utf8PathBuf,

    /// Where to write the renamed document (defaults to overwriting the input)
    #[arg(long, short)]
    pub output: Option<Utf8PathBuf>,

    /// Do not write the document back
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Directory holding the persisted settings
    #[arg(long, default_value = ".")]
    pub settings_dir: Utf8PathBuf,

    /// Settings slot name
    #[arg(long, default_value = DEFAULT_SETTINGS_SLOT)]
    pub slot: String,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: String,

    /// Also rename locked layers
    #[arg(long, overrides_with = "no_locked")]
    pub locked: bool,

    /// Leave locked layers alone
    #[arg(long, overrides_with = "locked")]
    pub no_locked: bool,

    /// Also rename hidden layers
    #[arg(long, overrides_with = "no_hidden")]
    pub hidden: bool,

    /// Leave hidden layers alone
    #[arg(long, overrides_with = "hidden")]
    pub no_hidden: bool,

    /// Also rename instances and their contents
    #[arg(long, overrides_with = "no_instance")]
    pub instance: bool,

    /// Leave instances and their contents alone
    #[arg(long, overrides_with = "instance")]
    pub no_instance: bool,

    /// Overwrite names a user typed in
    #[arg(long, overrides_with = "no_rename_custom_names")]
    pub rename_custom_names: bool,

    /// Keep names a user typed in
    #[arg(long, overrides_with = "rename_custom_names")]
    pub no_rename_custom_names: bool,

    /// Separate words with spaces
    #[arg(long, overrides_with = "no_show_spacing")]
    pub show_spacing: bool,

    /// Join words without spaces
    #[arg(long, overrides_with = "show_spacing")]
    pub no_show_spacing: bool,

    /// PascalCase names
    #[arg(long, overrides_with = "no_pascal_case")]
    pub pascal_case: bool,

    /// Lowercase names
    #[arg(long, overrides_with = "pascal_case")]
    pub no_pascal_case: bool,

    /// Debug logging
    #[arg(long, short)]
    pub debug: bool,

    /// Log to stderr as JSON lines instead of human-readable text
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Options given on the command line, merged over the persisted ones.
    /// A flag that is not given leaves the persisted value alone; the last of
    /// `--<flag>` and `--no-<flag>` wins.
    pub fn options_update(&self) -> RenameOptionsUpdate {
        RenameOptionsUpdate {
            locked: flag(self.locked, self.no_locked),
            hidden: flag(self.hidden, self.no_hidden),
            instance: flag(self.instance, self.no_instance),
            show_spacing: flag(self.show_spacing, self.no_show_spacing),
            rename_custom_names: flag(self.rename_custom_names, self.no_rename_custom_names),
            use_pascal_case: flag(self.pascal_case, self.no_pascal_case),
        }
    }

    /// Output path for the renamed document, `None` on a dry run
    pub fn output_path(&self) -> Option<&Utf8PathBuf> {
        if self.dry_run {
            None
        } else {
            Some(self.output.as_ref().unwrap_or(&self.document))
        }
    }
}

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
