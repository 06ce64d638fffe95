#[macro_export]
macro_rules! impl_index_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(i: usize) -> Self {
                Self(i)
            }

            pub fn get(&self) -> usize {
                self.0
            }
        }
    };
}
