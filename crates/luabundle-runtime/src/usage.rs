//! Harness wrapped around the usage example in the universal artifact.
//!
//! The example runs inside the loader's start callback. The prologue builds
//! the library and warns about missing FileIO support; the epilogue restores
//! the notification setup that is filtered out of the example text.

pub const USAGE_PROLOGUE: &str = r#"
local Library = LibraryBundle()
local Loader = Library.Loader
local Compatibility = Library.Compatibility

Loader:Start(function(report)
    if report and not report.FileIO then
        warn("This script requires FileIO support for Configs.")
    end
"#;

pub const USAGE_EPILOGUE: &str = r#"
    Library.Notifications:Init(Window.Gui)

    -- Show Compatibility Report
    if report and not report.UNC then
        Library.Notifications:Notify({Title = "Warning", Content = "Your executor does not support UNC standard.", Duration = 10})
    end
end)
"#;

/// Line markers dropped from the example before it is spliced in.
pub const DEFAULT_STRIP_MARKERS: &[&str] = &[
    "require(",
    "LibraryBundle()",
    "Library.Notifications:Init",
];
