use serde::{Deserialize, Serialize};

/// Options for one rename invocation.
///
/// Built once per RENAME command from the persisted settings merged with the
/// panel's input, then only read for the rest of the run. The first four
/// fields decide eligibility; `show_spacing` and `use_pascal_case` only shape
/// the strategy's output.
///
/// Serialized with snake_case keys. The camelCase keys sent by the panel are
/// accepted as aliases, as is their lowercased form read back by the layered
/// settings loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptions {
    /// Include locked nodes
    pub locked: bool,

    /// Include invisible nodes
    pub hidden: bool,

    /// Rename and descend into component instances
    pub instance: bool,

    #[serde(alias = "showSpacing", alias = "showspacing")]
    pub show_spacing: bool,

    /// Overwrite names that look manually authored
    #[serde(alias = "renameCustomNames", alias = "renamecustomnames")]
    pub rename_custom_names: bool,

    #[serde(alias = "usePascalCase", alias = "usepascalcase")]
    pub use_pascal_case: bool,
}

impl RenameOptions {
    /// Options with every gate opened.
    pub fn permissive() -> Self {
        Self {
            locked: true,
            hidden: true,
            instance: true,
            rename_custom_names: true,
            ..Self::default()
        }
    }
}

/// Options sent by the panel with a RENAME command.
///
/// Keys left out keep their persisted value; see [`apply_to`](Self::apply_to).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptionsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<bool>,

    #[serde(alias = "showSpacing", skip_serializing_if = "Option::is_none")]
    pub show_spacing: Option<bool>,

    #[serde(alias = "renameCustomNames", skip_serializing_if = "Option::is_none")]
    pub rename_custom_names: Option<bool>,

    #[serde(alias = "usePascalCase", skip_serializing_if = "Option::is_none")]
    pub use_pascal_case: Option<bool>,
}

impl RenameOptionsUpdate {
    /// Overlay the provided keys on `base`
    pub fn apply_to(&self, base: RenameOptions) -> RenameOptions {
        RenameOptions {
            locked: self.locked.unwrap_or(base.locked),
            hidden: self.hidden.unwrap_or(base.hidden),
            instance: self.instance.unwrap_or(base.instance),
            show_spacing: self.show_spacing.unwrap_or(base.show_spacing),
            rename_custom_names: self.rename_custom_names.unwrap_or(base.rename_custom_names),
            use_pascal_case: self.use_pascal_case.unwrap_or(base.use_pascal_case),
        }
    }
}

impl From<RenameOptions> for RenameOptionsUpdate {
    fn from(options: RenameOptions) -> Self {
        Self {
            locked: Some(options.locked),
            hidden: Some(options.hidden),
            instance: Some(options.instance),
            show_spacing: Some(options.show_spacing),
            rename_custom_names: Some(options.rename_custom_names),
            use_pascal_case: Some(options.use_pascal_case),
        }
    }
}
