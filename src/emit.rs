//! Generated C output.
//!
//! Three artifacts are written in lockstep:
//! - the declarations header (`funs.h`): one `extern` per command, the
//!   `A_<name>` key defines when keys are enabled, and the command count
//! - the documentation array (`doc.c`): function pointer and doc string rows
//! - the key array (`key.c`): user-visible names and their keys
//!
//! Every row for a command is written in the same call, so all three files
//! list commands in the same order with the same identifiers. Names and doc
//! strings are written as the raw bytes found in the source.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::Layout;
use crate::generate::GenerateError;
use crate::scan::Declaration;

/// Prefix of the per-command key defines.
const KEY_PREFIX: &str = "A_";

/// Name of the define holding the command count.
const COUNT_DEFINE: &str = "A_NCOMMANDS";

/// The three output destinations.
#[derive(Debug)]
pub struct Artifacts<W> {
    pub funs: W,
    pub doc: W,
    pub key: W,
}

/// Open the three files for writing.
pub fn create_files(
    funs: &Path,
    doc: &Path,
    key: &Path,
) -> Result<Artifacts<Box<dyn Write>>, GenerateError> {
    let open = |path: &Path| -> Result<Box<dyn Write>, GenerateError> {
        let file = File::create(path).map_err(|source| GenerateError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Box::new(BufWriter::new(file)))
    };

    Ok(Artifacts {
        funs: open(funs)?,
        doc: open(doc)?,
        key: open(key)?,
    })
}

/// Destinations that swallow everything (tags-only runs).
pub fn discard() -> Artifacts<Box<dyn Write>> {
    Artifacts {
        funs: Box::new(io::sink()),
        doc: Box::new(io::sink()),
        key: Box::new(io::sink()),
    }
}

/// Writes headers, rows and sentinels to the three artifacts.
pub struct Emitter<W: Write> {
    out: Artifacts<W>,
    layout: Layout,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: Artifacts<W>, layout: Layout) -> Self {
        Self { out, layout }
    }

    /// Write the leading boilerplate of each artifact.
    ///
    /// `funs_label` names the declarations header in its own first line;
    /// `program` is the command credited with generating the files; `args` are
    /// listed verbatim as the files groveled.
    pub fn write_headers(&mut self, funs_label: &str, program: &str, args: &[String]) -> io::Result<()> {
        let funs = &mut self.out.funs;
        writeln!(
            funs,
            "/* {} -- Generated declarations for Info commands. */\n\n#include \"info.h\"",
            funs_label
        )?;

        let doc = &mut self.out.doc;
        writeln!(
            doc,
            "/* doc.c -- Generated structure containing function names and doc strings."
        )?;
        writeln!(doc)?;
        writeln!(
            doc,
            "   This file was automatically made from various source files with the"
        )?;
        writeln!(
            doc,
            "   command `{}'.  DO NOT EDIT THIS FILE, only `{}.c'.",
            program, program
        )?;
        writeln!(doc, "   Source files groveled to make this file include:\n")?;

        let key = &mut self.out.key;
        writeln!(key, "/* key.c -- Generated array containing function names.")?;
        writeln!(key)?;
        writeln!(
            key,
            "   This file was automatically made from various source files with the"
        )?;
        writeln!(
            key,
            "   command \"{}\".  DO NOT EDIT THIS FILE, only \"{}.c\".",
            program, program
        )?;
        writeln!(key)?;
        writeln!(key, "   Source files groveled to make this file include:\n")?;

        for arg in args {
            writeln!(self.out.doc, "\t{}", arg)?;
            writeln!(self.out.key, "\t{}", arg)?;
        }

        let doc = &mut self.out.doc;
        writeln!(doc)?;
        writeln!(
            doc,
            "   An entry in the array FUNCTION_DOC_ARRAY is made for each command"
        )?;
        writeln!(
            doc,
            "   found in the above files; each entry consists of a function pointer,"
        )?;
        if self.layout.named_functions {
            writeln!(
                doc,
                "   a string which is the user-visible name of the function,"
            )?;
        }
        writeln!(doc, "   and a string which documents its purpose. */")?;
        writeln!(doc)?;
        writeln!(doc, "#include \"info.h\"")?;
        writeln!(doc, "#include \"funs.h\"")?;
        writeln!(doc)?;
        writeln!(doc, "FUNCTION_DOC function_doc_array[] = {{")?;
        writeln!(doc)?;

        let key = &mut self.out.key;
        writeln!(key)?;
        writeln!(
            key,
            "   An entry in the array FUNCTION_KEY_ARRAY is made for each command"
        )?;
        writeln!(key, "   found in the above files; each entry consists of")?;
        writeln!(
            key,
            "   a string which is the user-visible name of the function.  */"
        )?;
        writeln!(key)?;
        writeln!(key, "#include \"key.h\"")?;
        writeln!(key, "#include \"funs.h\"")?;
        writeln!(key)?;
        writeln!(key, "FUNCTION_KEY function_key_array[] = {{")?;
        writeln!(key)?;

        Ok(())
    }

    /// Announce the file whose commands follow.
    pub fn begin_file(&mut self, filename: &str) -> io::Result<()> {
        writeln!(self.out.doc, "/* Commands found in \"{}\". */", filename)?;
        writeln!(self.out.key, "/* Commands found in \"{}\". */", filename)?;
        writeln!(self.out.funs, "\n/* Functions declared in \"{}\". */", filename)?;
        Ok(())
    }

    /// Write one command's rows to all three artifacts.
    pub fn write_declaration(&mut self, decl: &Declaration, key: u32) -> io::Result<()> {
        let raw = decl.raw_name.as_slice();
        let visible = decl.visible_name.as_slice();
        let doc = decl.doc.as_slice();

        let out = &mut self.out.doc;
        match (self.layout.numeric_keys, self.layout.named_functions) {
            (true, true) => write_parts(
                out,
                &[
                    b"   { (VFunction *)",
                    raw,
                    b", \"",
                    visible,
                    b"\", (FUNCTION_KEYSEQ *)0, ",
                    doc,
                    b" },\n",
                ],
            )?,
            (true, false) => write_parts(
                out,
                &[b"   { (VFunction *) ", raw, b", (FUNCTION_KEYSEQ *)0, ", doc, b" },\n"],
            )?,
            (false, true) => {
                write_parts(out, &[b"   { ", raw, b", \"", visible, b"\", ", doc, b" },\n"])?
            }
            (false, false) => write_parts(out, &[b"   { ", raw, b", ", doc, b" },\n"])?,
        }

        if self.layout.numeric_keys {
            let prefix = KEY_PREFIX.as_bytes();
            write_parts(&mut self.out.key, &[b"   { \"", visible, b"\", ", prefix, raw, b" },\n"])?;
            write_parts(&mut self.out.funs, &[b"#define ", prefix, raw])?;
            writeln!(self.out.funs, " {}", key)?;
        } else {
            write_parts(&mut self.out.key, &[b"   { \"", visible, b"\" },\n"])?;
        }

        write_parts(
            &mut self.out.funs,
            &[
                b"extern void ",
                raw,
                b" (WINDOW *window, int count, unsigned char key);\n",
            ],
        )
    }

    /// Close every array, record the command count and flush.
    pub fn finish(mut self, total: u32) -> io::Result<Artifacts<W>> {
        let sentinel = match (self.layout.numeric_keys, self.layout.named_functions) {
            (true, true) => {
                "   { (VFunction *)NULL, (char *)NULL, (FUNCTION_KEYSEQ *)NULL, (char *)NULL }"
            }
            (true, false) => "   { (VFunction *)NULL, (FUNCTION_KEYSEQ *)NULL, (char *)NULL }",
            (false, true) => "   { (VFunction *)NULL, (char *)NULL, (char *)NULL }",
            (false, false) => "   { (VFunction *)NULL, (char *)NULL }",
        };
        writeln!(self.out.doc, "{}\n}};", sentinel)?;

        if self.layout.numeric_keys {
            writeln!(self.out.key, "   {{ (char *)NULL, 0 }}\n}};")?;
        } else {
            writeln!(self.out.key, "   {{ (char *)NULL }}\n}};")?;
        }
        writeln!(self.out.funs, "\n#define {} {}", COUNT_DEFINE, total)?;

        self.out.funs.flush()?;
        self.out.doc.flush()?;
        self.out.key.flush()?;
        Ok(self.out)
    }
}

fn write_parts<W: Write>(out: &mut W, parts: &[&[u8]]) -> io::Result<()> {
    for part in parts {
        out.write_all(part)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffers() -> Artifacts<Vec<u8>> {
        Artifacts {
            funs: Vec::new(),
            doc: Vec::new(),
            key: Vec::new(),
        }
    }

    fn decl(raw: &str, visible: &str, doc: &str) -> Declaration {
        Declaration {
            raw_name: raw.as_bytes().to_vec(),
            tag_name: format!("DECLARE_INFO_COMMAND ({}", raw).into_bytes(),
            visible_name: visible.as_bytes().to_vec(),
            doc: doc.as_bytes().to_vec(),
            line: 1,
            offset: 0,
        }
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_keyed_named_rows() {
        let mut emitter = Emitter::new(buffers(), Layout::default());
        emitter.begin_file("echo-area.c").unwrap();
        emitter
            .write_declaration(&decl("info_ea_yank", "echo-area-yank", "\"Yank back\""), 4)
            .unwrap();
        let out = emitter.finish(5).unwrap();

        let doc = text(out.doc);
        assert!(doc.contains("/* Commands found in \"echo-area.c\". */\n"));
        assert!(doc.contains(
            "   { (VFunction *)info_ea_yank, \"echo-area-yank\", (FUNCTION_KEYSEQ *)0, \"Yank back\" },\n"
        ));
        assert!(doc.ends_with(
            "   { (VFunction *)NULL, (char *)NULL, (FUNCTION_KEYSEQ *)NULL, (char *)NULL }\n};\n"
        ));

        let key = text(out.key);
        assert!(key.contains("   { \"echo-area-yank\", A_info_ea_yank },\n"));
        assert!(key.ends_with("   { (char *)NULL, 0 }\n};\n"));

        let funs = text(out.funs);
        assert_eq!(
            funs,
            "\n/* Functions declared in \"echo-area.c\". */\n\
             #define A_info_ea_yank 4\n\
             extern void info_ea_yank (WINDOW *window, int count, unsigned char key);\n\
             \n#define A_NCOMMANDS 5\n"
        );
    }

    #[test]
    fn test_unkeyed_layouts() {
        let layout = Layout {
            numeric_keys: false,
            named_functions: false,
        };
        let mut emitter = Emitter::new(buffers(), layout);
        emitter
            .write_declaration(&decl("info_quit", "quit", "\"Quit\""), 0)
            .unwrap();
        let out = emitter.finish(1).unwrap();

        let doc = text(out.doc);
        assert_eq!(
            doc,
            "   { info_quit, \"Quit\" },\n   { (VFunction *)NULL, (char *)NULL }\n};\n"
        );
        assert_eq!(text(out.key), "   { \"quit\" },\n   { (char *)NULL }\n};\n");

        assert_eq!(
            text(out.funs),
            "extern void info_quit (WINDOW *window, int count, unsigned char key);\n\
             \n#define A_NCOMMANDS 1\n"
        );
    }

    #[test]
    fn test_keys_without_names() {
        let layout = Layout {
            numeric_keys: true,
            named_functions: false,
        };
        let mut emitter = Emitter::new(buffers(), layout);
        emitter
            .write_declaration(&decl("info_quit", "quit", "\"Quit\""), 0)
            .unwrap();
        let out = emitter.finish(1).unwrap();

        let doc = text(out.doc);
        assert!(doc.starts_with("   { (VFunction *) info_quit, (FUNCTION_KEYSEQ *)0, \"Quit\" },\n"));
        assert!(doc.ends_with("   { (VFunction *)NULL, (FUNCTION_KEYSEQ *)NULL, (char *)NULL }\n};\n"));
    }

    #[test]
    fn test_names_without_keys() {
        let layout = Layout {
            numeric_keys: false,
            named_functions: true,
        };
        let mut emitter = Emitter::new(buffers(), layout);
        emitter
            .write_declaration(&decl("info_quit", "quit", "\"Quit\""), 0)
            .unwrap();
        let out = emitter.finish(1).unwrap();

        assert_eq!(
            text(out.doc),
            "   { info_quit, \"quit\", \"Quit\" },\n   { (VFunction *)NULL, (char *)NULL, (char *)NULL }\n};\n"
        );
    }

    #[test]
    fn test_doc_bytes_are_written_unchanged() {
        let mut emitter = Emitter::new(buffers(), Layout::default());
        let mut d = decl("info_menu", "menu", "");
        d.doc = b"\"Men\xfa principal\"".to_vec();
        emitter.write_declaration(&d, 0).unwrap();
        let out = emitter.finish(1).unwrap();

        let row: &[u8] =
            b"   { (VFunction *)info_menu, \"menu\", (FUNCTION_KEYSEQ *)0, \"Men\xfa principal\" },\n";
        assert!(out.doc.starts_with(row));
    }

    #[test]
    fn test_headers_list_arguments() {
        let mut emitter = Emitter::new(buffers(), Layout::default());
        let args = vec!["-tags".to_string(), "session.c".to_string()];
        emitter.write_headers("funs.h", "makedoc", &args).unwrap();
        let out = emitter.finish(0).unwrap();

        let funs = text(out.funs);
        assert!(funs.starts_with(
            "/* funs.h -- Generated declarations for Info commands. */\n\n#include \"info.h\"\n"
        ));

        let doc = text(out.doc);
        assert!(doc.starts_with(
            "/* doc.c -- Generated structure containing function names and doc strings.\n\n"
        ));
        assert!(doc.contains("command `makedoc'.  DO NOT EDIT THIS FILE, only `makedoc.c'.\n"));
        assert!(doc.contains(
            "   Source files groveled to make this file include:\n\n\t-tags\n\tsession.c\n\n"
        ));
        assert!(doc.contains("   a string which is the user-visible name of the function,\n"));
        assert!(doc.contains("FUNCTION_DOC function_doc_array[] = {\n\n"));

        let key = text(out.key);
        assert!(key.contains("command \"makedoc\".  DO NOT EDIT THIS FILE, only \"makedoc.c\".\n\n"));
        assert!(key.contains("\t-tags\n\tsession.c\n"));
        assert!(key.contains("FUNCTION_KEY function_key_array[] = {\n\n"));
    }

    #[test]
    fn test_headers_omit_visible_name_note() {
        let layout = Layout {
            numeric_keys: true,
            named_functions: false,
        };
        let mut emitter = Emitter::new(buffers(), layout);
        emitter.write_headers("funs.h", "makedoc", &[]).unwrap();
        let out = emitter.finish(0).unwrap();

        assert!(!text(out.doc).contains("user-visible name of the function,"));
    }
}
