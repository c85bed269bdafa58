/// Connect a chain of nodes
///
/// `"input"` feeds the engine input into the first node and `"output"` routes
/// the last node to the engine output. Anything else must have a `node` field.
///
/// # Example
///
/// ```
/// connect_nodes!(oscillator => gain => context.destination());
/// connect_nodes!("input" => gain => "output");
/// ```
#[macro_export]
macro_rules! connect_nodes {
    ("input" => $destination:expr $(=> $($rest:tt)+)?) => {
        $destination.node.connect_to_input();
        $($crate::connect_nodes!($destination => $($rest)+);)?
    };
    ($source:expr => "output") => {
        $source.node.connect_to_output();
    };
    ($source:expr => $destination:expr $(=> $($rest:tt)+)?) => {
        $source.node.connect_to(&$destination.node);
        $($crate::connect_nodes!($destination => $($rest)+);)?
    };
}
