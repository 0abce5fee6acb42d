/// A quantity lowered to the argument kinds the renderer understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericArg {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl NumericArg {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NumericArg::Signed(_) => "signed integer",
            NumericArg::Unsigned(_) => "unsigned integer",
            NumericArg::Float(_) => "floating-point",
        }
    }
}

/// Numeric types accepted as the quantity of a formatted value
pub trait Numeric: Copy {
    fn to_arg(self) -> NumericArg;
}

macro_rules! impl_numeric {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_arg(self) -> NumericArg {
                    NumericArg::$variant(self as $target)
                }
            }
        )*
    };
}

impl_numeric!(Signed, i64; i8, i16, i32, i64, isize);
impl_numeric!(Unsigned, u64; u8, u16, u32, u64, usize);
impl_numeric!(Float, f64; f32, f64);

impl Numeric for NumericArg {
    fn to_arg(self) -> NumericArg {
        self
    }
}
