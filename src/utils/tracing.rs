/// Log an error as a full snafu report, optionally wrapped with a message.
#[macro_export]
macro_rules! tracing_report {
    ($error:expr) => {
        tracing::error!(err = %snafu::Report::from_error(&$error))
    };
    ($error:expr, $message:expr) => {
        let wrapped = <snafu::Whatever as snafu::FromString>::with_source(
            $error.into(),
            $message.to_string(),
        );
        tracing::error!(err = %snafu::Report::from_error(wrapped));
    };
}
