/// A contiguous run of ids, `start` inclusive and `end` exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange<Id> {
    pub start: Id,
    pub end: Id,
}

impl<Id> IdRange<Id>
where
    Id: Copy + From<usize>,
    usize: From<Id>,
{
    pub fn empty() -> Self {
        Self {
            start: Id::from(0),
            end: Id::from(0),
        }
    }

    pub fn from_start_and_len(start: Id, len: usize) -> Self {
        Self {
            start,
            end: Id::from(usize::from(start) + len),
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.end) - usize::from(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounds(&self) -> (usize, usize) {
        (usize::from(self.start), usize::from(self.end))
    }

    pub fn get(&self, i: usize) -> Option<Id> {
        let id = usize::from(self.start) + i;
        if id < usize::from(self.end) {
            Some(Id::from(id))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Id> + DoubleEndedIterator {
        (usize::from(self.start)..usize::from(self.end)).map(Id::from)
    }
}

impl<Id> From<std::ops::Range<usize>> for IdRange<Id>
where
    Id: From<usize>,
{
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: Id::from(range.start),
            end: Id::from(range.end),
        }
    }
}

impl<Id> IntoIterator for IdRange<Id>
where
    Id: Copy + From<usize>,
    usize: From<Id>,
{
    type Item = Id;
    type IntoIter = std::iter::Map<std::ops::Range<usize>, fn(usize) -> Id>;

    fn into_iter(self) -> Self::IntoIter {
        (usize::from(self.start)..usize::from(self.end)).map(Id::from as fn(usize) -> Id)
    }
}

impl<Id> std::fmt::Debug for IdRange<Id>
where
    Id: Copy,
    usize: From<Id>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdRange({}..{})", usize::from(self.start), usize::from(self.end))
    }
}
