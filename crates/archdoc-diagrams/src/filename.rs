//! Exported diagram filename conventions.

/// Prefix of workspace-qualified diagram files.
const WORKSPACE_PREFIX: &str = "structurizr-";

/// Suffix of legend images exported next to each view.
const LEGEND_SUFFIX: &str = "-key";

/// Image extensions served as diagrams.
pub(crate) const DIAGRAM_EXTENSIONS: &[&str] = &["png", "svg"];

/// View key of a `structurizr-<workspaceId>-<viewKey>[-key].<ext>` file.
///
/// Everything after the workspace id is the key, so keys may contain dashes.
///
/// ```
/// use archdoc_diagrams::view_key_from_filename;
///
/// assert_eq!(
///     view_key_from_filename("structurizr-456-System-Landscape.png"),
///     Some("System-Landscape")
/// );
/// assert_eq!(view_key_from_filename("notes.png"), None);
/// ```
pub fn view_key_from_filename(filename: &str) -> Option<&str> {
    let (stem, _ext) = filename.rsplit_once('.')?;
    let stem = stem.strip_suffix(LEGEND_SUFFIX).unwrap_or(stem);
    let rest = stem.strip_prefix(WORKSPACE_PREFIX)?;
    let (_workspace, key) = rest.split_once('-')?;
    (!key.is_empty()).then_some(key)
}

/// Workspace id of a `structurizr-<workspaceId>-...` file.
pub(crate) fn workspace_of(filename: &str) -> Option<&str> {
    let rest = filename.strip_prefix(WORKSPACE_PREFIX)?;
    rest.split_once('-').map(|(workspace, _)| workspace)
}

/// Whether `filename` is a legend image rather than a view.
pub fn is_legend(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, _)| stem.ends_with(LEGEND_SUFFIX))
}

/// Extension of `filename` if it is a served diagram format.
pub(crate) fn diagram_extension(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    DIAGRAM_EXTENSIONS
        .iter()
        .find(|candidate| ext.eq_ignore_ascii_case(candidate))
        .copied()
}
