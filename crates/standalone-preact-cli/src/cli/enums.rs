use clap::ValueEnum;
use standalone_preact::OutputFormat;

/// Module format of the produced bundle
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FormatArg {
    /// ES module exporting every selected name
    ///
    /// Load it with `<script type="module">` and `import { ... } from`.
    #[value(name = "esm", alias = "module")]
    Esm,

    /// Classic script assigning the selected names to a window global
    ///
    /// Load it with a plain `<script src>` tag.
    #[value(name = "iife", alias = "global")]
    Iife,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Esm => OutputFormat::Esm,
            FormatArg::Iife => OutputFormat::Iife,
        }
    }
}
