#![allow(missing_docs)]

use edm_testkit::sample_file;
use edmio::edm::EdmFile;

#[test]
fn decoded_model_serializes_to_json() {
	let decoded = EdmFile::from_bytes(&sample_file()).expect("sample decodes");
	let json = serde_json::to_value(&decoded.file).expect("model serializes");

	assert_eq!(json["version"], 8);
	assert_eq!(json["index_b"]["__gv_bytes_fvec4"], 108);
	assert_eq!(json["root"]["name"], "sample_model");
	assert_eq!(json["root"]["materials"][0]["entries"]["NAME"]["Name"], "hull");
	assert_eq!(json["root"]["properties"]["opacity"]["Constant"]["Float"], 0.5);
	assert_eq!(json["root"]["nodes"][3]["ArgPosition"]["trailer"], serde_json::json!([4, 5]));
	assert_eq!(json["connectors"][0]["data"].as_array().map(Vec::len), Some(16));
	assert_eq!(json["render_nodes"][0]["indices"]["U16"], serde_json::json!([0, 1, 2]));
	assert_eq!(json["list_order"], serde_json::json!(["Connectors", "RenderNodes"]));
}

#[test]
fn warnings_serialize_with_offsets() {
	let mut bytes = sample_file();
	bytes.push(0);
	let decoded = EdmFile::from_bytes(&bytes).expect("decodes");
	let json = serde_json::to_value(&decoded.warnings).expect("warnings serialize");
	assert_eq!(json[0]["TrailingData"]["remaining"], 1);
	assert_eq!(json[0]["TrailingData"]["at"], bytes.len() - 1);
}
