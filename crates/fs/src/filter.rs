use crate::record::FileEntry;

/// Decides whether a discovered file belongs in the working set.
pub trait FileFilter {
    fn accept(&self, entry: &FileEntry) -> bool;
}

/// Filter with no active checks; every file passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl FileFilter for AcceptAll {
    #[inline]
    fn accept(&self, _entry: &FileEntry) -> bool {
        true
    }
}

impl<F> FileFilter for F
where
    F: Fn(&FileEntry) -> bool,
{
    #[inline]
    fn accept(&self, entry: &FileEntry) -> bool {
        self(entry)
    }
}
