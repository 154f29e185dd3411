// src/github/binary.rs
// =============================================================================
// Decides whether a file's content is worth downloading.
//
// The check is purely by extension: the text after the last '.' in the file
// name, compared case-sensitively against a fixed list of dotted extensions.
// A name without any '.' is compared as-is, so it never matches the list
// ("Makefile" is not binary, and neither is an extensionless executable).
// =============================================================================

/// Extensions whose content is skipped instead of inlined into the prompt
const BINARY_EXTENSIONS: &[&str] = &[
    // Executables, libraries and compiled objects
    ".exe", ".dll", ".so", ".dylib", ".bin", ".o", ".obj", ".a", ".lib", ".class",
    ".jar", ".war", ".pyc", ".pyo", ".wasm", ".elf",
    // Archives and compression
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar", ".zst", ".lz4",
    // Office documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods", ".odp",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tif", ".tiff", ".psd",
    // Audio and video
    ".mp3", ".wav", ".flac", ".ogg", ".aac", ".mp4", ".avi", ".mov", ".mkv", ".webm",
    // Fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // Virtual disks
    ".iso", ".img", ".dmg", ".vmdk", ".vhd", ".vhdx", ".vdi", ".qcow2",
    // Databases
    ".db", ".sqlite", ".sqlite3", ".mdb", ".accdb", ".dat",
    // Packages
    ".deb", ".rpm", ".apk", ".msi", ".pkg", ".whl", ".nupkg", ".gem",
    // Certificates and keys
    ".pem", ".crt", ".cer", ".der", ".key", ".p12", ".pfx", ".jks", ".keystore",
    // Lock files and logs
    ".lock", ".log",
];

/// Returns true when `filename` has an extension from the binary list
///
/// Examples:
///   is_binary("archive.tar.gz") -> true   (trailing ".gz")
///   is_binary("README.md")      -> false
///   is_binary("Makefile")       -> false  (no '.', never matches)
pub fn is_binary(filename: &str) -> bool {
    let extension = match filename.rfind('.') {
        Some(dot) => &filename[dot..],
        None => filename,
    };
    BINARY_EXTENSIONS.contains(&extension)
}
