fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use dropzone_protocol::{
        ApiResponse, CreateFolderRequest, Folder, SIGNED_UPLOAD_FIELDS, SignUploadRequest,
        StorageErrorBody, StoredAsset, UploadSignature,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn decode<T: serde::de::DeserializeOwned>(name: &str) -> T {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    /// Deserializes a fixture, re-serializes it, and compares the JSON values.
    ///
    /// Only valid for shapes we also send, where no field is dropped.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = decode(name);
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  ours: {reserialized}"
        );
    }

    // --- Backend API ---

    #[test]
    fn fixture_folders_list() {
        roundtrip_test::<ApiResponse<Vec<Folder>>>("folders_list.json");

        let folders = decode::<ApiResponse<Vec<Folder>>>("folders_list.json")
            .into_data("failed to load folders")
            .unwrap();
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[1].name, "team-photos");
    }

    #[test]
    fn fixture_sign_upload_request() {
        roundtrip_test::<SignUploadRequest>("sign_upload_request.json");
        assert_eq!(
            serde_json::to_value(SignUploadRequest::auto("invoices")).unwrap(),
            load_fixture("sign_upload_request.json")
        );
    }

    #[test]
    fn fixture_sign_upload_response() {
        roundtrip_test::<ApiResponse<UploadSignature>>("sign_upload_response.json");

        let sig = decode::<ApiResponse<UploadSignature>>("sign_upload_response.json")
            .into_data("failed to sign")
            .unwrap();
        assert_eq!(sig.timestamp, 1_717_171_717);
        assert_eq!(sig.cloud_name, "demo");
        assert_eq!(sig.folder, "invoices");
    }

    #[test]
    fn fixture_create_folder() {
        roundtrip_test::<CreateFolderRequest>("create_folder_request.json");
        roundtrip_test::<ApiResponse<Folder>>("create_folder_response.json");
    }

    #[test]
    fn fixture_delete_folder_response() {
        roundtrip_test::<ApiResponse<serde_json::Value>>("delete_folder_response.json");
        let resp = decode::<ApiResponse<serde_json::Value>>("delete_folder_response.json");
        assert!(resp.into_unit("failed to delete folder").is_ok());
    }

    #[test]
    fn fixture_failure_envelope() {
        roundtrip_test::<ApiResponse<Folder>>("failure_envelope.json");
        let err = decode::<ApiResponse<Folder>>("failure_envelope.json")
            .into_data("failed to create folder")
            .unwrap_err();
        assert_eq!(err, "Folder already exists");
    }

    // --- Storage provider ---

    #[test]
    fn fixture_storage_upload_response_ignores_extra_fields() {
        let asset: StoredAsset = decode("storage_upload_response.json");
        assert_eq!(asset.public_id, "invoices/january");
        assert!(asset.secure_url.starts_with("https://"));
    }

    #[test]
    fn fixture_storage_error() {
        let body: StorageErrorBody = decode("storage_error.json");
        assert!(body.error.message.starts_with("Invalid Signature"));
    }

    #[test]
    fn signed_fields_match_signature_keys() {
        let data = &load_fixture("sign_upload_response.json")["data"];
        for field in SIGNED_UPLOAD_FIELDS.iter().filter(|f| **f != "file") {
            assert!(data.get(*field).is_some(), "signature lacks {field}");
        }
    }
}
