//! Call-site sugar for XML-RPC methods
//!
//! The macro turns a wire-level method name into a typed Rust function, so
//! call sites read like native invocations. It is a thin forward to
//! [`ProxyClient::execute`](crate::ProxyClient::execute); no classification
//! logic lives here.

/// Define typed wrappers for one XML-RPC method
///
/// Generates an async function forwarding to `execute`, plus a
/// `*_with_callback` twin forwarding to `execute_with_callback`.
///
/// # Example
/// ```rust,ignore
/// xmlrpc_client::xmlrpc_method! {
///     fn get_state_name(state_number: i32) -> String,
///     method: "examples.getStateName",
/// }
///
/// let name = get_state_name(&client, 41).await?;
/// ```
#[macro_export]
macro_rules! xmlrpc_method {
    (
        fn $name:ident($($param:ident: $ptype:ty),* $(,)?) -> $ret:ty,
        method: $method:literal $(,)?
    ) => {
        $crate::paste::paste! {
            #[doc = concat!("Call the `", $method, "` XML-RPC method")]
            pub async fn $name(
                client: &$crate::ProxyClient,
                $($param: $ptype,)*
            ) -> $crate::Result<$ret> {
                client
                    .execute(
                        $method,
                        Some(vec![$($crate::codec::Encode::to_value(&$param)),*]),
                    )
                    .await
            }

            #[doc = concat!("Call `", $method, "`, delivering the outcome to a completion handler")]
            pub fn [<$name _with_callback>](
                client: &$crate::ProxyClient,
                $($param: $ptype,)*
                on_complete: impl FnOnce($crate::Result<$ret>) + Send + 'static,
            ) {
                client.execute_with_callback(
                    $method,
                    Some(vec![$($crate::codec::Encode::to_value(&$param)),*]),
                    on_complete,
                )
            }
        }
    };
}
