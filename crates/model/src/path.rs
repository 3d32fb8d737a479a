use crate::tree::TreeNode;

/// Flattens a dotted field path into a name usable in declarations.
pub fn field_name(path: &str) -> String {
    path.replace('.', "_")
}

/// Walks a dot-separated path through nested objects.
pub fn resolve_path<'a, N: TreeNode>(node: &'a N, path: &str) -> Option<&'a N> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(node, |current, segment| current.get(segment))
}
