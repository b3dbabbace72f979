pub mod swagger;

pub use swagger::{
    FsSwaggerSource, SwaggerDocument, SwaggerSource, load_documents, load_swagger,
    resolve_swagger_path, resolve_swagger_paths,
};
