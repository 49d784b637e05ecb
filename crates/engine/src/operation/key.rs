use indexmap::IndexSet;

id_newtypes::NonZeroU32! {
    ResponseKey,
}

/// Interned response keys (field aliases or names) of an operation.
#[derive(Debug, Clone, Default)]
pub struct ResponseKeys(IndexSet<String>);

impl ResponseKeys {
    pub fn get_or_intern(&mut self, key: &str) -> ResponseKey {
        if let Some(index) = self.0.get_index_of(key) {
            return ResponseKey::from(index);
        }
        let (index, _) = self.0.insert_full(key.to_string());
        ResponseKey::from(index)
    }

    pub fn get(&self, key: &str) -> Option<ResponseKey> {
        self.0.get_index_of(key).map(ResponseKey::from)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Index<ResponseKey> for ResponseKeys {
    type Output = str;

    fn index(&self, key: ResponseKey) -> &Self::Output {
        self.0
            .get_index(usize::from(key))
            .map(String::as_str)
            .unwrap_or_default()
    }
}
