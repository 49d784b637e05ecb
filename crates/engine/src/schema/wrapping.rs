/// Nullability and list wrapping of a field type, innermost first.
///
/// `[Int!]` is `Wrapping::required().list()`, `[[String]!]!` is
/// `Wrapping::nullable().list_non_null().list_non_null()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wrapping {
    inner_is_required: bool,
    list_depth: u8,
    // Bit `i` is set when the list at depth `i` (0 being the innermost) is non-null.
    required_lists: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListWrapping {
    RequiredList,
    NullableList,
}

const MAX_LIST_DEPTH: u8 = 16;

impl Wrapping {
    pub fn nullable() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            inner_is_required: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn list(self) -> Self {
        self.wrap(false)
    }

    #[must_use]
    pub fn list_non_null(self) -> Self {
        self.wrap(true)
    }

    fn wrap(mut self, required: bool) -> Self {
        debug_assert!(self.list_depth < MAX_LIST_DEPTH, "too many nested lists");
        if required {
            self.required_lists |= 1 << self.list_depth;
        }
        self.list_depth += 1;
        self
    }

    /// Whether the outermost type is non-null.
    pub fn is_required(&self) -> bool {
        match self.list_depth {
            0 => self.inner_is_required,
            depth => self.required_lists & (1 << (depth - 1)) != 0,
        }
    }

    pub fn is_nullable(&self) -> bool {
        !self.is_required()
    }

    pub fn is_list(&self) -> bool {
        self.list_depth > 0
    }

    pub fn inner_is_required(&self) -> bool {
        self.inner_is_required
    }

    /// Wrapping of the list items, if this is a list.
    pub fn item_wrapping(&self) -> Option<Self> {
        let depth = self.list_depth.checked_sub(1)?;
        Some(Self {
            inner_is_required: self.inner_is_required,
            list_depth: depth,
            required_lists: self.required_lists & !(1 << depth),
        })
    }

    pub fn list_wrappings(&self) -> impl ExactSizeIterator<Item = ListWrapping> + '_ {
        (0..self.list_depth).map(|depth| {
            if self.required_lists & (1 << depth) != 0 {
                ListWrapping::RequiredList
            } else {
                ListWrapping::NullableList
            }
        })
    }

    /// Renders the wrapping around a named type, `[Int!]!` style.
    pub fn type_display(&self, name: &str) -> String {
        let mut out = name.to_string();
        if self.inner_is_required {
            out.push('!');
        }
        for wrapping in self.list_wrappings() {
            out = match wrapping {
                ListWrapping::RequiredList => format!("[{out}]!"),
                ListWrapping::NullableList => format!("[{out}]"),
            };
        }
        out
    }
}

impl std::fmt::Debug for Wrapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_display("T"))
    }
}
