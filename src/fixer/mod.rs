//! The fix coordinator: safely rewrites files with violations that carry a
//! mechanical fix, backing up originals and validating the result before
//! committing, rolling back on any failure after the backup is taken.

use crate::lint::{apply_fixes, Linter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Maximum number of fix/re-lint passes run to convergence for a single file.
pub const DEFAULT_MAX_FIX_PASSES: usize = 10;

/// Lifecycle state of a [`FixOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    /// Not yet started.
    Pending,
    /// Backup taken, fixes being computed/applied.
    Running,
    /// Written and validated successfully.
    Completed,
    /// Failed before any destructive step (or validation rejected the result
    /// and rollback wasn't needed because nothing was written).
    Failed,
    /// A write succeeded but validation failed, and the original was restored
    /// from backup.
    RolledBack,
}

/// Tracks one file's fix attempt end-to-end, for reporting.
#[derive(Debug, Clone)]
pub struct FixOperation {
    /// Path of the file being fixed.
    pub path: PathBuf,
    /// Path of the backup taken before any write, if one was created.
    pub backup_path: Option<PathBuf>,
    /// Current lifecycle state.
    pub status: FixStatus,
    /// Number of violations that had a fix applied.
    pub fixes_applied: usize,
    /// Number of fix/re-lint passes run.
    pub passes: usize,
    /// Failure detail, set when `status` is `Failed` or `RolledBack`.
    pub error: Option<String>,
}

impl FixOperation {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            backup_path: None,
            status: FixStatus::Pending,
            fixes_applied: 0,
            passes: 0,
            error: None,
        }
    }
}

/// Outcome of a batch fix run.
#[derive(Debug, Default)]
pub struct FixResult {
    /// One entry per file attempted, in input order.
    pub operations: Vec<FixOperation>,
}

impl FixResult {
    /// Files whose fix completed successfully.
    pub fn succeeded(&self) -> impl Iterator<Item = &FixOperation> {
        self.operations.iter().filter(|op| op.status == FixStatus::Completed)
    }

    /// Files that were rolled back to their original content.
    pub fn rolled_back(&self) -> impl Iterator<Item = &FixOperation> {
        self.operations.iter().filter(|op| op.status == FixStatus::RolledBack)
    }

    /// Whether every file either needed no fix or completed/rolled back cleanly
    /// (i.e. nothing is left in `Failed` state).
    pub fn all_handled(&self) -> bool {
        self.operations.iter().all(|op| op.status != FixStatus::Failed)
    }
}

/// Coordinates safe, validated in-place fixes across a batch of files.
pub struct FixCoordinator<'a> {
    linter: &'a Linter,
    max_passes: usize,
    dry_run: bool,
}

impl<'a> FixCoordinator<'a> {
    /// A coordinator that writes fixes to disk, up to [`DEFAULT_MAX_FIX_PASSES`].
    pub fn new(linter: &'a Linter) -> Self {
        Self { linter, max_passes: DEFAULT_MAX_FIX_PASSES, dry_run: false }
    }

    /// Compute fixes without writing anything back to disk.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Cap the number of fix/re-lint passes per file.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Fix every file in `paths`, returning a per-file report.
    pub fn fix_files(&self, paths: &[String]) -> FixResult {
        let operations = paths.iter().map(|p| self.fix_one(Path::new(p))).collect();
        FixResult { operations }
    }

    fn fix_one(&self, path: &Path) -> FixOperation {
        let mut op = FixOperation::new(path.to_path_buf());

        // Step 1: prepare.
        if let Err(e) = self.prepare(path) {
            op.status = FixStatus::Failed;
            op.error = Some(e);
            return op;
        }
        op.status = FixStatus::Running;

        // Step 2: read the original snapshot.
        let original = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                op.status = FixStatus::Failed;
                op.error = Some(format!("failed to read file: {e}"));
                return op;
            }
        };

        // Step 3: converge fixes by repeatedly linting and applying.
        let (fixed, fixes_applied, passes) = self.converge(path, &original);
        op.fixes_applied = fixes_applied;
        op.passes = passes;

        if fixed == original {
            op.status = FixStatus::Completed;
            return op;
        }

        if self.dry_run {
            op.status = FixStatus::Completed;
            return op;
        }

        // Step 4: back up before any destructive step.
        let backup_path = match self.backup(path) {
            Ok(p) => p,
            Err(e) => {
                op.status = FixStatus::Failed;
                op.error = Some(e);
                return op;
            }
        };
        log::debug!("backed up {} to {}", path.display(), backup_path.display());
        op.backup_path = Some(backup_path.clone());

        // Step 5: write atomically.
        if let Err(e) = self.write_atomic(path, &fixed) {
            op.status = FixStatus::Failed;
            op.error = Some(format!("write failed (nothing was overwritten): {e}"));
            let _ = fs::remove_file(&backup_path);
            return op;
        }

        // Step 6: validate.
        if let Err(e) = validate_fixed_content(&original, &fixed) {
            log::warn!("fix validation failed for {}, rolling back: {e}", path.display());
            match self.recover(path, &backup_path) {
                Ok(()) => {
                    op.status = FixStatus::RolledBack;
                    op.error = Some(e);
                }
                Err(rollback_err) => {
                    op.status = FixStatus::Failed;
                    op.error = Some(format!("{e}; additionally, rollback failed: {rollback_err}"));
                }
            }
            return op;
        }

        log::debug!("fixed {} ({} violation(s) applied over {} pass(es))", path.display(), op.fixes_applied, op.passes);
        op.status = FixStatus::Completed;
        op
    }

    fn prepare(&self, path: &Path) -> std::result::Result<(), String> {
        let meta = fs::metadata(path).map_err(|e| format!("cannot stat file: {e}"))?;
        if !meta.is_file() {
            return Err("not a regular file".to_string());
        }
        let mut f = fs::OpenOptions::new().read(true).write(true).open(path).map_err(|e| format!("file is not readable/writable: {e}"))?;
        f.flush().ok();
        Ok(())
    }

    fn backup(&self, path: &Path) -> std::result::Result<PathBuf, String> {
        let mut candidate = path.with_extension(format!("{}.bak", path.extension().and_then(|e| e.to_str()).unwrap_or("md")));
        let mut suffix = 1u32;
        while candidate.exists() {
            candidate = path.with_extension(format!("{}.bak.{}", path.extension().and_then(|e| e.to_str()).unwrap_or("md"), suffix));
            suffix += 1;
        }
        fs::copy(path, &candidate).map_err(|e| format!("failed to create backup: {e}"))?;
        Ok(candidate)
    }

    /// Write via temp-file + fsync + rename so a crash mid-write never leaves
    /// a truncated file in `path`'s place.
    fn write_atomic(&self, path: &Path, content: &str) -> std::io::Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let tmp_path = dir.join(format!(".{}.mdlint-tmp", path.file_name().and_then(|n| n.to_str()).unwrap_or("fix")));

        {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(content.as_bytes())?;
            tmp.sync_all()?;
        }

        if let Ok(meta) = fs::metadata(path) {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&tmp_path, fs::Permissions::from_mode(meta.permissions().mode()));
            }
        }

        fs::rename(&tmp_path, path)
    }

    fn recover(&self, path: &Path, backup_path: &Path) -> std::result::Result<(), String> {
        fs::copy(backup_path, path).map_err(|e| format!("failed to restore backup: {e}"))?;
        Ok(())
    }

    /// Repeatedly lint-then-apply-fixes until the content stabilizes or
    /// `max_passes` is reached, mirroring how cascading fixes (e.g. a
    /// heading-level fix un-triggering a spacing rule) are resolved.
    fn converge(&self, path: &Path, original: &str) -> (String, usize, usize) {
        let identifier = path.to_string_lossy().to_string();
        let mut content = original.to_string();
        let mut total_fixes = 0usize;

        for pass in 1..=self.max_passes {
            let violations = self.linter.lint_content(&identifier, &content, None);

            let fixable_count = violations.iter().filter(|v| v.fix_info.is_some()).count();
            if fixable_count == 0 {
                return (content, total_fixes, pass);
            }

            let fixed = apply_fixes(&content, &violations);
            if fixed == content {
                return (content, total_fixes, pass);
            }

            total_fixes += fixable_count;
            content = fixed;
        }

        (content, total_fixes, self.max_passes)
    }
}

/// Validate that a fixed document is still a plausible rewrite of the
/// original, per checks (a)-(g):
///
/// (a) not empty when the original wasn't,
/// (b) no line exceeds 50000 characters,
/// (c) no embedded NUL bytes,
/// (d) fenced code blocks remain balanced,
/// (e) total size didn't change by more than 50%,
/// (f) the number of non-blank lines didn't change by more than
///     `max(5, floor(original_non_blank_lines / 2))`,
/// (g) the line-ending style (LF vs CRLF) is preserved.
fn validate_fixed_content(original: &str, fixed: &str) -> std::result::Result<(), String> {
    if !original.trim().is_empty() && fixed.trim().is_empty() {
        return Err("fix produced an empty document".to_string());
    }

    if fixed.lines().any(|l| l.len() > 50_000) {
        return Err("fix produced a line longer than 50000 characters".to_string());
    }

    if fixed.contains('\0') {
        return Err("fix produced a NUL byte".to_string());
    }

    if count_fence_markers(fixed) % 2 != 0 {
        return Err("fix left an unbalanced fenced code block".to_string());
    }

    let orig_len = original.len().max(1);
    let delta = (fixed.len() as i64 - original.len() as i64).unsigned_abs() as usize;
    if delta * 100 > orig_len * 50 {
        return Err("fix changed the document size by more than 50%".to_string());
    }

    let orig_non_blank = original.lines().filter(|l| !l.trim().is_empty()).count();
    let fixed_non_blank = fixed.lines().filter(|l| !l.trim().is_empty()).count();
    let max_line_delta = (orig_non_blank / 2).max(5);
    let line_delta = (fixed_non_blank as i64 - orig_non_blank as i64).unsigned_abs() as usize;
    if line_delta > max_line_delta {
        return Err("fix changed the number of non-blank lines more than expected".to_string());
    }

    let orig_crlf = original.contains("\r\n");
    let fixed_crlf = fixed.contains("\r\n");
    if orig_crlf != fixed_crlf && fixed.contains('\n') {
        return Err("fix changed the document's line-ending style".to_string());
    }

    Ok(())
}

fn count_fence_markers(content: &str) -> usize {
    let mut count = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            count += 1;
        }
    }
    count
}

/// Collect heading anchors per identifier across a set of already-linted
/// files, for cross-file link-fragment validation (e.g. MD051).
pub fn build_workspace_heading_index(files: &[String]) -> std::collections::HashMap<String, Vec<String>> {
    use crate::helpers::collect_heading_ids;

    let mut index = std::collections::HashMap::new();
    for path in files {
        let Ok(content) = fs::read_to_string(path) else { continue };
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        index.insert(path.clone(), collect_heading_ids(&lines));
    }
    index
}
