//! A small set of safe wrappers around the raw OpenGL calls this program
//! needs: shader compilation and linking, buffer upload, and info-log
//! diagnostics.
//!
//! Raw `gl` calls are used instead of a rendering library because all that
//! gets drawn is a single quad colored by a uniform. The wrappers exist so
//! the unsafe FFI surface stays in one place and every GL object has an
//! owner that deletes it on drop.

pub mod buffer;
pub mod diagnostics;
pub mod shader;

#[cfg(test)]
mod test {
    use super::diagnostics::{DiagnosticLog, LOG_CAPACITY};
    use super::shader::{Shader, ShaderError, ShaderStage};

    #[test]
    fn stages_map_to_the_backend_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn stages_display_by_name() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn short_diagnostics_round_trip() {
        let log = DiagnosticLog::from_text("0:12(3): error: syntax error");

        assert!(!log.is_empty());
        assert_eq!(log.as_text(), "0:12(3): error: syntax error");
    }

    #[test]
    fn diagnostics_truncate_at_capacity() {
        let long = "e".repeat(LOG_CAPACITY * 2);
        let log = DiagnosticLog::from_text(&long);

        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.as_text().len(), LOG_CAPACITY);
    }

    #[test]
    fn empty_diagnostics_read_as_empty_text() {
        let log = DiagnosticLog::empty();

        assert!(log.is_empty());
        assert_eq!(log.as_text(), "");
        assert_eq!(log.to_string(), "");
    }

    #[test]
    fn hostile_reported_lengths_are_clamped() {
        // A backend that lies about how much it wrote must not let the log
        // read past its own buffer, or below zero.
        let overlong = DiagnosticLog::read(|_, written, _| unsafe { *written = 9_999 });
        assert_eq!(overlong.len(), LOG_CAPACITY);

        let negative = DiagnosticLog::read(|_, written, _| unsafe { *written = -4 });
        assert!(negative.is_empty());
    }

    #[test]
    fn nul_bytes_in_source_fail_the_right_stage_before_the_backend() {
        // No GL context exists in the test process; reaching the backend
        // would abort the test, so this also proves the check is local.
        let err = Shader::compile("void main() {\0}", ShaderStage::Fragment)
            .err()
            .expect("a NUL byte cannot be handed to the compiler");

        match &err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
            }
            ShaderError::Link { .. } => panic!("compilation never got far enough to link"),
        }

        let rendered = err.to_string();
        assert!(rendered.contains("fragment"));
    }

    #[test]
    fn compile_errors_carry_the_diagnostic_text() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: DiagnosticLog::from_text("0:1(1): error: expected ';'"),
        };

        let rendered = err.to_string();
        assert!(rendered.contains("vertex"));
        assert!(rendered.contains("expected ';'"));
    }
}
