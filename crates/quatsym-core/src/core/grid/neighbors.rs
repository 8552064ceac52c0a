/// Result of a neighborhood query.
///
/// The three shapes are kept distinct so callers can branch on them without
/// inspecting a length: an empty result is [`Neighbors::Empty`], a single hit
/// is [`Neighbors::Single`], anything larger is a freshly collected
/// [`Neighbors::Many`] snapshot that does not alias the grid's buckets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Neighbors<T> {
    #[default]
    Empty,
    Single(T),
    Many(Vec<T>),
}

impl<T> Neighbors<T> {
    pub fn len(&self) -> usize {
        match self {
            Neighbors::Empty => 0,
            Neighbors::Single(_) => 1,
            Neighbors::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Neighbors::Empty)
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Neighbors::Empty => &[],
            Neighbors::Single(item) => std::slice::from_ref(item),
            Neighbors::Many(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Neighbors::Empty => Vec::new(),
            Neighbors::Single(item) => vec![item],
            Neighbors::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for Neighbors<T> {
    fn from(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Neighbors::Empty,
            1 => match items.pop() {
                Some(item) => Neighbors::Single(item),
                None => Neighbors::Empty,
            },
            _ => Neighbors::Many(items),
        }
    }
}

impl<'a, T> IntoIterator for &'a Neighbors<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Neighbors<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
