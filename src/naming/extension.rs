/// Strip parameters and whitespace from a `content-type` value, lower-casing the essence.
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Derive an extension from the MIME subtype alone.
///
/// `image/png` becomes `png`, structured suffixes are dropped (`image/svg+xml` becomes
/// `svg`) and the JavaScript subtypes map to `js`. Returns `None` for an empty subtype.
pub fn subtype_extension(content_type: &str) -> Option<String> {
    let essence = mime_essence(content_type);
    let subtype = essence.rsplit('/').next().unwrap_or("");
    let subtype = subtype.split('+').next().unwrap_or("");

    match subtype {
        "" => None,
        "x-javascript" | "javascript" => Some("js".to_string()),
        other => Some(other.to_string()),
    }
}

/// Map a declared content type to a conventional file extension.
///
/// Types the MIME database lists with several extensions use a preferred choice, the rest
/// take the first registered extension. Types unknown to the database fall back to
/// [`subtype_extension`].
pub fn extension_for_mime(content_type: &str) -> Option<String> {
    let essence = mime_essence(content_type);
    if let Some(preferred) = preferred_extension(&essence) {
        return Some(preferred.to_string());
    }

    match mime_guess::get_mime_extensions_str(&essence).and_then(|known| known.first()) {
        Some(extension) => Some((*extension).to_string()),
        None => subtype_extension(&essence),
    }
}

// Database entries are sorted, so `image/jpeg` would otherwise become `jfif`.
fn preferred_extension(essence: &str) -> Option<&'static str> {
    let extension = match essence {
        "image/jpeg" | "image/pjpeg" => "jpeg",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        "text/html" => "html",
        "text/plain" => "txt",
        "text/xml" | "application/xml" => "xml",
        "application/json" | "text/json" => "json",
        "application/javascript" | "application/x-javascript" | "text/javascript" => "js",
        "application/octet-stream" => "bin",
        "application/vnd.ms-excel" => "xls",
        "application/vnd.ms-powerpoint" => "ppt",
        "font/ttf" | "application/x-font-ttf" => "ttf",
        "audio/mpeg" => "mp3",
        "audio/mp4" => "m4a",
        _ => return None,
    };
    Some(extension)
}

/// Split a file name into stem and extension (including the dot).
///
/// A leading dot does not start an extension, so `.htaccess` has none.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) if index > 0 => file_name.split_at(index),
        _ => (file_name, ""),
    }
}
