pub(crate) mod rounding;
