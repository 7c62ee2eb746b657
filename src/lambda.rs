#[cfg(feature = "lambda")]
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
#[cfg(feature = "lambda")]
use region_intake::core::resolver::pick_zip;
#[cfg(feature = "lambda")]
use region_intake::core::validation::parse_body;
#[cfg(feature = "lambda")]
use region_intake::core::{RegionStore, RequestStore};
#[cfg(feature = "lambda")]
use region_intake::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use region_intake::{
    ApiResponse, DynamoStore, IntakeFunction, LambdaConfig, RequestIntake, TokenVerifier,
    ZipResolver,
};

/// Process-lifetime resources, built once before the first invocation.
#[cfg(feature = "lambda")]
struct Services<S> {
    store: S,
    verifier: TokenVerifier,
    function: IntakeFunction,
}

#[cfg(feature = "lambda")]
async fn function_handler<S>(services: &Services<S>, event: Request) -> Result<Response<Body>, Error>
where
    S: RegionStore + RequestStore,
{
    let body = parse_body(event.body().as_ref());

    let response = match services.function {
        IntakeFunction::ResolveZip => {
            let query = event.query_string_parameters();
            let zip = pick_zip(query.first("zip"), body.as_ref());
            ZipResolver::new(&services.store).handle(zip.as_ref()).await
        }
        IntakeFunction::SubmitRequest => {
            RequestIntake::new(&services.store, &services.verifier)
                .handle(body.as_ref())
                .await
        }
    };

    into_http_response(&response)
}

#[cfg(feature = "lambda")]
fn into_http_response(response: &ApiResponse) -> Result<Response<Body>, Error> {
    let http_response = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::from(response.to_json()))
        .map_err(Box::new)?;

    Ok(http_response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;
    tracing::info!("Starting {:?} function", config.function);

    // 連線在啟動時建立一次，之後注入每次呼叫
    let services = Services {
        store: DynamoStore::connect(&config).await,
        verifier: TokenVerifier::new(&config.jwt_key),
        function: config.function,
    };

    run(service_fn(|event| function_handler(&services, event))).await
}
