#[cfg(feature = "debug")]
macro_rules! debug_log {
  ($format:literal, $($values:expr),+$(,)?) => { {
    let bt = backtrace::Backtrace::new();
    tracing::debug!($format, $($values),+);
    tracing::debug!("{:?}", bt);
  } };
  ($format:literal) => { {
    let bt = backtrace::Backtrace::new();
    tracing::debug!($format);
    tracing::debug!("{:?}", bt);
  } };
}

#[cfg(not(feature = "debug"))]
macro_rules! debug_log {
  ($format:literal, $($values:expr),+$(,)?) => {{
    $(let _ = &$values;)+
  }};
  ($format:literal) => {{}};
}
