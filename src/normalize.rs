use super::entry::EntryKind;
use super::script::has_non_latin;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Stem used when nothing is left after normalization.
pub const UNNAMED: &str = "unnamed";

/// Normalize a file name: ASCII, lowercase, words joined by `_`, extension kept.
/// Names written in a non-Latin script are returned as they are.
pub fn normalize(name: &str) -> String {
    normalize_entry(name, EntryKind::File)
}

/// Normalize an entry name. Directories have no extension.
pub fn normalize_entry(name: &str, kind: EntryKind) -> String {
    if has_non_latin(name) {
        return name.to_owned();
    }

    let (stem, ext) = match kind {
        EntryKind::Directory => (name, None),
        EntryKind::File | EntryKind::Symlink => split_extension(name),
    };

    let mut result = collapse(&fold_to_ascii(stem));
    if result.is_empty() {
        result.push_str(UNNAMED);
    }
    if let Some(ext) = ext {
        let ext = collapse(&fold_to_ascii(ext));
        if !ext.is_empty() {
            result.push('.');
            result.push_str(&ext);
        }
    }
    result
}

/// Split at the last dot. A leading dot does not start an extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(i) if i > 0 => (&name[..i], Some(&name[i + 1..])),
        _ => (name, None),
    }
}

/// Decompose and keep the ASCII part. Letters without a decomposition
/// go through a small table; everything else is dropped.
fn fold_to_ascii(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.nfkd() {
        if c.is_ascii() {
            result.push(c);
            continue;
        }
        if is_combining_mark(c) {
            continue;
        }
        let folded = match c {
            'ß' => "ss",
            'æ' => "ae",
            'Æ' => "AE",
            'ø' => "o",
            'Ø' => "O",
            'œ' => "oe",
            'Œ' => "OE",
            'đ' | 'ð' => "d",
            'Đ' | 'Ð' => "D",
            'ł' => "l",
            'Ł' => "L",
            'þ' => "th",
            'Þ' => "TH",
            'ı' => "i",
            _ => "",
        };
        result.push_str(folded);
    }
    result
}

/// Lowercase, and turn every run of non-alphanumerics into one `_`.
/// Leading and trailing separators vanish.
fn collapse(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending && !result.is_empty() {
                result.push('_');
            }
            pending = false;
            result.push(c.to_ascii_lowercase());
        } else {
            pending = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize("Café Résumé.TXT"), "cafe_resume.txt");
        assert_eq!(normalize("日本語.txt"), "日本語.txt");
        assert_eq!(normalize("My-File (1).PDF"), "my_file_1.pdf");
        assert_eq!(normalize("  __Hello,   World!__ .md"), "hello_world.md");
        assert_eq!(normalize("Straße Ærø.txt"), "strasse_aero.txt");
        assert_eq!(normalize("señor_niño"), "senor_nino");
        assert_eq!(normalize("a__b"), "a_b");
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize("archive.tar.GZ"), "archive_tar.gz");
        assert_eq!(normalize(".bashrc"), "bashrc");
        assert_eq!(normalize("file."), "file");
        assert_eq!(normalize("notes.!!"), "notes");
        assert_eq!(normalize("???.txt"), "unnamed.txt");
        assert_eq!(normalize(""), "unnamed");
    }

    #[test]
    fn test_normalize_keeps_unlisted_scripts() {
        for name in [
            "ᐃᓄᒃᑎᑐᑦ.txt",
            "ⵜⴰⵎⴰⵣⵉⵖⵜ.txt",
            "ߒߞߏ.txt",
            "ꕙꔤ.txt",
            "𞤀𞤣𞤤𞤢𞤥.txt",
            "ᱚᱞ ᱪᱤᱠᱤ",
            "ᚠᚢᚦ notes.md",
        ] {
            assert_eq!(normalize(name), name);
        }
        assert_eq!(normalize("Chapter Ⅻ.txt"), "chapter_xii.txt");
    }

    #[test]
    fn test_normalize_directory() {
        assert_eq!(normalize_entry("My.Folder", EntryKind::Directory), "my_folder");
        assert_eq!(normalize_entry("Año 2024", EntryKind::Directory), "ano_2024");
        assert_eq!(normalize_entry("Фото", EntryKind::Directory), "Фото");
    }

    #[test]
    fn test_normalize_keeps_non_latin() {
        let names = [
            "Привет мир.doc",
            "한국어 파일.txt",
            "שלום",
            "مرحبا.PDF",
            "สวัสดี",
            "नमस्ते.txt",
            "Mixed 中文 Name.TXT",
            "Ελληνικά.txt",
            "ｶﾀｶﾅ",
        ];
        for name in names {
            assert_eq!(normalize(name), name);
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        let names = [
            "Café Résumé.TXT",
            "  Leading and trailing  ",
            "--dash--case--",
            "UPPER.lower.Mixed",
            "a.b.c.d",
            "tab\tand\nnewline.CSV",
            "100% done!.txt",
            "emoji 😀 name.png",
            "....",
            ".hidden.Conf",
            "ﬁnal ﬂow.txt",
            "x.",
            "",
        ];
        for name in names {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", name);
            let dir = normalize_entry(name, EntryKind::Directory);
            assert_eq!(normalize_entry(&dir, EntryKind::Directory), dir);
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.txt"), ("a", Some("txt")));
        assert_eq!(split_extension("a.b.txt"), ("a.b", Some("txt")));
        assert_eq!(split_extension(".env"), (".env", None));
        assert_eq!(split_extension("plain"), ("plain", None));
    }
}
